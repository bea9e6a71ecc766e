mod command;
mod memory;
mod query;
mod record;

use std::sync::Arc;

use self::command::OrderCommandRepository;
use self::memory::MemoryOrderRepository;
use self::query::OrderQueryRepository;

use super::MemoryStore;
use crate::{
    abstract_trait::{DynOrderCommandRepository, DynOrderQueryRepository},
    config::ConnectionPool,
};

#[derive(Clone)]
pub struct OrderRepository {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
}

impl OrderRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(OrderQueryRepository::new(pool.clone())) as DynOrderQueryRepository;

        let command =
            Arc::new(OrderCommandRepository::new(pool.clone())) as DynOrderCommandRepository;

        Self { query, command }
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        let repo = Arc::new(MemoryOrderRepository::new(store));

        Self {
            query: repo.clone() as DynOrderQueryRepository,
            command: repo as DynOrderCommandRepository,
        }
    }
}
