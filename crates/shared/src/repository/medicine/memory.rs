use crate::{
    abstract_trait::{MedicineCommandRepositoryTrait, MedicineQueryRepositoryTrait},
    domain::requests::{CreateMedicineRequest, MedicineFilter, UpdateMedicineRequest},
    errors::RepositoryError,
    model::{DEFAULT_MEDICINE_IMAGE, Medicine as MedicineModel},
    repository::MemoryStore,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

pub struct MemoryMedicineRepository {
    store: MemoryStore,
}

impl MemoryMedicineRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn non_blank(image: Option<&str>) -> Option<&str> {
    image.filter(|image| !image.trim().is_empty())
}

#[async_trait]
impl MedicineQueryRepositoryTrait for MemoryMedicineRepository {
    async fn find_all(
        &self,
        filter: &MedicineFilter,
    ) -> Result<Vec<MedicineModel>, RepositoryError> {
        let state = self.store.read().await;

        let medicines = state
            .medicines
            .values()
            .filter(|m| filter.category.is_none_or(|category| m.category == category))
            .filter(|m| {
                filter
                    .search
                    .as_deref()
                    .is_none_or(|needle| m.matches_search(needle))
            })
            .cloned()
            .collect();

        Ok(medicines)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MedicineModel>, RepositoryError> {
        Ok(self.store.read().await.medicines.get(&id).cloned())
    }
}

#[async_trait]
impl MedicineCommandRepositoryTrait for MemoryMedicineRepository {
    async fn create_medicine(
        &self,
        req: &CreateMedicineRequest,
    ) -> Result<MedicineModel, RepositoryError> {
        let mut state = self.store.write().await;
        let now = Utc::now().naive_utc();
        let medicine_id = state.next_medicine_id();

        let medicine = MedicineModel {
            medicine_id,
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            category: req.category,
            dosage: req.dosage.clone(),
            manufacturer: req.manufacturer.clone(),
            expiry_date: req.expiry_date,
            stock: req.stock,
            image: non_blank(req.image.as_deref())
                .unwrap_or(DEFAULT_MEDICINE_IMAGE)
                .to_string(),
            requires_prescription: req.requires_prescription,
            created_at: Some(now),
            updated_at: Some(now),
        };

        state.medicines.insert(medicine_id, medicine.clone());
        info!("✅ Created medicine ID {} ({})", medicine_id, medicine.name);

        Ok(medicine)
    }

    async fn update_medicine(
        &self,
        req: &UpdateMedicineRequest,
    ) -> Result<MedicineModel, RepositoryError> {
        let id = req.id.ok_or(RepositoryError::NotFound)?;
        let mut state = self.store.write().await;

        let medicine = state
            .medicines
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;

        medicine.name = req.name.clone();
        medicine.description = req.description.clone();
        medicine.price = req.price;
        medicine.category = req.category;
        medicine.dosage = req.dosage.clone();
        medicine.manufacturer = req.manufacturer.clone();
        medicine.expiry_date = req.expiry_date;
        medicine.stock = req.stock;
        if let Some(image) = non_blank(req.image.as_deref()) {
            medicine.image = image.to_string();
        }
        medicine.requires_prescription = req.requires_prescription;
        medicine.updated_at = Some(Utc::now().naive_utc());

        info!("🔄 Updated medicine ID {}", id);
        Ok(medicine.clone())
    }

    async fn delete_medicine(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.store.write().await;

        state
            .medicines
            .remove(&id)
            .map(|_| info!("🗑️ Deleted medicine ID {}", id))
            .ok_or(RepositoryError::NotFound)
    }
}
