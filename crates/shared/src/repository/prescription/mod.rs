mod memory;
mod store;

use self::memory::MemoryPrescriptionRepository;
use self::store::PgPrescriptionRepository;

use super::MemoryStore;
use crate::{abstract_trait::DynPrescriptionRepository, config::ConnectionPool};
use std::sync::Arc;

#[derive(Clone)]
pub struct PrescriptionRepository {
    pub repo: DynPrescriptionRepository,
}

impl PrescriptionRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            repo: Arc::new(PgPrescriptionRepository::new(pool)) as DynPrescriptionRepository,
        }
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            repo: Arc::new(MemoryPrescriptionRepository::new(store)) as DynPrescriptionRepository,
        }
    }
}
