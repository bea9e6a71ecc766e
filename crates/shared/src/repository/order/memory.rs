use super::command::{decrement, quantities_by_medicine};
use crate::{
    abstract_trait::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    domain::requests::NewOrder,
    errors::RepositoryError,
    model::{Order as OrderModel, OrderItem, OrderStatus},
    repository::MemoryStore,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

pub struct MemoryOrderRepository {
    store: MemoryStore,
}

impl MemoryOrderRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn newest_first(mut orders: Vec<OrderModel>) -> Vec<OrderModel> {
    orders.sort_by(|a, b| b.order_id.cmp(&a.order_id));
    orders
}

#[async_trait]
impl OrderQueryRepositoryTrait for MemoryOrderRepository {
    async fn find_all(&self) -> Result<Vec<OrderModel>, RepositoryError> {
        let state = self.store.read().await;
        Ok(newest_first(state.orders.values().cloned().collect()))
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError> {
        let state = self.store.read().await;
        Ok(newest_first(
            state
                .orders
                .values()
                .filter(|order| order.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        Ok(self.store.read().await.orders.get(&id).cloned())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for MemoryOrderRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderModel, RepositoryError> {
        let mut state = self.store.write().await;
        let wanted = quantities_by_medicine(order);

        // Check every line before touching anything.
        let mut decrements = Vec::with_capacity(wanted.len());
        for (medicine_id, quantity) in wanted {
            let medicine = state
                .medicines
                .get(&medicine_id)
                .ok_or(RepositoryError::MissingMedicine(medicine_id))?;

            let quantity = decrement(medicine_id, medicine.stock, quantity).inspect_err(|_| {
                warn!(
                    "⚠️ Stock for medicine ID {} dropped to {} before commit (wanted {})",
                    medicine_id, medicine.stock, quantity
                );
            })?;
            decrements.push((medicine_id, quantity));
        }

        let now = Utc::now().naive_utc();

        for (medicine_id, quantity) in decrements {
            if let Some(medicine) = state.medicines.get_mut(&medicine_id) {
                medicine.stock -= quantity;
                medicine.updated_at = Some(now);
            }
        }

        let order_id = state.next_order_id();
        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            items.push(OrderItem {
                order_item_id: state.next_order_item_id(),
                medicine_id: item.medicine_id,
                medicine_name: item.medicine_name.clone(),
                quantity: item.quantity,
                price: item.price,
            });
        }

        let created = OrderModel {
            order_id,
            user_id: order.user_id,
            items,
            total: order.total,
            status: OrderStatus::Pending,
            delivery_details: order.delivery_details.clone(),
            payment_details: order.payment_details.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        state.orders.insert(order_id, created.clone());
        info!(
            "✅ Created order ID {} for user {} ({} lines)",
            order_id,
            order.user_id,
            created.items.len()
        );

        Ok(created)
    }

    async fn update_status(
        &self,
        id: i32,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError> {
        let mut state = self.store.write().await;
        let order = state.orders.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        if order.status != expected {
            return Err(RepositoryError::Conflict(format!(
                "order {id} is no longer {expected}"
            )));
        }

        order.status = status;
        order.updated_at = Some(Utc::now().naive_utc());

        info!("🔄 Order ID {} moved from {} to {}", id, expected, status);
        Ok(order.clone())
    }
}
