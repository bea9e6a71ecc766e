use crate::{
    domain::requests::{NewUser, UpdateProfileRequest},
    errors::RepositoryError,
    model::User as UserModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    /// Fails with [`RepositoryError::AlreadyExists`] on a duplicate email.
    async fn create_user(&self, req: &NewUser) -> Result<UserModel, RepositoryError>;
    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<UserModel, RepositoryError>;
}
