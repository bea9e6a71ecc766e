use crate::model::{Medicine, Order, Prescription, User};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct MemoryState {
    pub medicines: BTreeMap<i32, Medicine>,
    pub orders: BTreeMap<i32, Order>,
    pub users: BTreeMap<i32, User>,
    pub prescriptions: BTreeMap<i32, Prescription>,
    medicine_seq: i32,
    order_seq: i32,
    order_item_seq: i32,
    user_seq: i32,
    prescription_seq: i32,
}

impl MemoryState {
    pub fn next_medicine_id(&mut self) -> i32 {
        self.medicine_seq += 1;
        self.medicine_seq
    }

    pub fn next_order_id(&mut self) -> i32 {
        self.order_seq += 1;
        self.order_seq
    }

    pub fn next_order_item_id(&mut self) -> i32 {
        self.order_item_seq += 1;
        self.order_item_seq
    }

    pub fn next_user_id(&mut self) -> i32 {
        self.user_seq += 1;
        self.user_seq
    }

    pub fn next_prescription_id(&mut self) -> i32 {
        self.prescription_seq += 1;
        self.prescription_seq
    }
}

/// Process-local document store shared by the in-memory repositories.
///
/// A single lock guards every collection, so a write guard is an atomic unit
/// across medicines and orders alike.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.inner.write().await
    }
}
