mod command;
mod memory;
mod query;
mod record;

use std::sync::Arc;

use self::command::MedicineCommandRepository;
use self::memory::MemoryMedicineRepository;
use self::query::MedicineQueryRepository;

use super::MemoryStore;
use crate::{
    abstract_trait::{DynMedicineCommandRepository, DynMedicineQueryRepository},
    config::ConnectionPool,
};

#[derive(Clone)]
pub struct MedicineRepository {
    pub query: DynMedicineQueryRepository,
    pub command: DynMedicineCommandRepository,
}

impl MedicineRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query =
            Arc::new(MedicineQueryRepository::new(pool.clone())) as DynMedicineQueryRepository;

        let command =
            Arc::new(MedicineCommandRepository::new(pool.clone())) as DynMedicineCommandRepository;

        Self { query, command }
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        let repo = Arc::new(MemoryMedicineRepository::new(store));

        Self {
            query: repo.clone() as DynMedicineQueryRepository,
            command: repo as DynMedicineCommandRepository,
        }
    }
}
