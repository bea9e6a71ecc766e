use crate::{
    abstract_trait::PrescriptionRepositoryTrait, domain::requests::NewPrescription,
    errors::RepositoryError, model::Prescription as PrescriptionModel, repository::MemoryStore,
};
use async_trait::async_trait;
use chrono::Utc;

pub struct MemoryPrescriptionRepository {
    store: MemoryStore,
}

impl MemoryPrescriptionRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PrescriptionRepositoryTrait for MemoryPrescriptionRepository {
    async fn create(&self, req: &NewPrescription) -> Result<PrescriptionModel, RepositoryError> {
        let mut state = self.store.write().await;

        let prescription = PrescriptionModel {
            prescription_id: state.next_prescription_id(),
            user_id: req.user_id,
            name: req.name.clone(),
            file_name: req.file_name.clone(),
            url: req.url.clone(),
            upload_date: Utc::now().naive_utc(),
        };

        state
            .prescriptions
            .insert(prescription.prescription_id, prescription.clone());

        Ok(prescription)
    }

    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<PrescriptionModel>, RepositoryError> {
        let state = self.store.read().await;

        Ok(state
            .prescriptions
            .values()
            .rev()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PrescriptionModel>, RepositoryError> {
        Ok(self.store.read().await.prescriptions.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.store.write().await;

        state
            .prescriptions
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
