mod command;
mod memory;
mod query;
mod record;

use self::command::UserCommandRepository;
use self::memory::MemoryUserRepository;
use self::query::UserQueryRepository;

use super::MemoryStore;
use crate::{
    abstract_trait::{DynUserCommandRepository, DynUserQueryRepository},
    config::ConnectionPool,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserRepository {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
}

impl UserRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(UserQueryRepository::new(pool.clone())) as DynUserQueryRepository;
        let command =
            Arc::new(UserCommandRepository::new(pool.clone())) as DynUserCommandRepository;

        Self { query, command }
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        let repo = Arc::new(MemoryUserRepository::new(store));

        Self {
            query: repo.clone() as DynUserQueryRepository,
            command: repo as DynUserCommandRepository,
        }
    }
}
