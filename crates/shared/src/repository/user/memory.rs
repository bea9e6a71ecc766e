use crate::{
    abstract_trait::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    domain::requests::{NewUser, UpdateProfileRequest},
    errors::RepositoryError,
    model::User as UserModel,
    repository::MemoryStore,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for MemoryUserRepository {
    async fn find_by_id(&self, user_id: i32) -> Result<Option<UserModel>, RepositoryError> {
        Ok(self.store.read().await.users.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        let state = self.store.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for MemoryUserRepository {
    async fn create_user(&self, req: &NewUser) -> Result<UserModel, RepositoryError> {
        let mut state = self.store.write().await;

        if state.users.values().any(|u| u.email == req.email) {
            return Err(RepositoryError::AlreadyExists(format!(
                "user with email {}",
                req.email
            )));
        }

        let now = Utc::now().naive_utc();
        let user = UserModel {
            user_id: state.next_user_id(),
            name: req.name.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
            phone: req.phone.clone(),
            address: req.address.clone(),
            role: req.role,
            created_at: Some(now),
            updated_at: Some(now),
        };

        state.users.insert(user.user_id, user.clone());
        info!("✅ User created: {}", user.email);

        Ok(user)
    }

    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<UserModel, RepositoryError> {
        let mut state = self.store.write().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or(RepositoryError::NotFound)?;

        user.name = req.name.clone();
        user.phone = req.phone.clone();
        user.address = req.address.clone();
        user.updated_at = Some(Utc::now().naive_utc());

        info!("🔄 Updated profile of user {}", user_id);
        Ok(user.clone())
    }
}
