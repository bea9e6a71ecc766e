use super::record::{ORDER_COLUMNS, ORDER_ITEM_COLUMNS, OrderItemRecord, OrderRecord, assemble};
use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::NewOrder,
    errors::RepositoryError,
    model::{Order as OrderModel, OrderItem, OrderStatus},
};
use async_trait::async_trait;
use sqlx::types::Json;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

/// Total quantity per medicine, in ascending id order so concurrent
/// placements lock rows in the same sequence. Sums are widened so repeated
/// lines cannot wrap around.
pub(super) fn quantities_by_medicine(order: &NewOrder) -> BTreeMap<i32, i64> {
    let mut wanted = BTreeMap::new();
    for item in &order.items {
        *wanted.entry(item.medicine_id).or_insert(0) += i64::from(item.quantity);
    }
    wanted
}

/// Narrows a summed quantity that already fits within `available`.
pub(super) fn decrement(
    medicine_id: i32,
    available: i32,
    quantity: i64,
) -> Result<i32, RepositoryError> {
    if quantity > i64::from(available) {
        return Err(RepositoryError::InsufficientStock {
            medicine_id,
            available,
        });
    }

    i32::try_from(quantity).map_err(|_| RepositoryError::InsufficientStock {
        medicine_id,
        available,
    })
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        for (medicine_id, quantity) in quantities_by_medicine(order) {
            let stock: Option<i32> = sqlx::query_scalar(
                "SELECT stock FROM medicines WHERE medicine_id = $1 FOR UPDATE",
            )
            .bind(medicine_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|err| {
                error!("❌ Failed to lock medicine ID {}: {:?}", medicine_id, err);
                RepositoryError::from(err)
            })?;

            let Some(available) = stock else {
                warn!("⚠️ Medicine ID {} vanished before commit", medicine_id);
                return Err(RepositoryError::MissingMedicine(medicine_id));
            };

            let quantity = decrement(medicine_id, available, quantity).inspect_err(|_| {
                warn!(
                    "⚠️ Stock for medicine ID {} dropped to {} before commit (wanted {})",
                    medicine_id, available, quantity
                );
            })?;

            sqlx::query(
                r#"
                UPDATE medicines
                SET stock = stock - $1,
                    updated_at = current_timestamp
                WHERE medicine_id = $2
                "#,
            )
            .bind(quantity)
            .bind(medicine_id)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to decrease stock of medicine ID {}: {:?}",
                    medicine_id, err
                );
                RepositoryError::from(err)
            })?;
        }

        let sql = format!(
            r#"
            INSERT INTO orders (user_id, total, status, delivery_details, payment_details,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(order.user_id)
            .bind(order.total)
            .bind(OrderStatus::Pending.as_str())
            .bind(Json(&order.delivery_details))
            .bind(Json(&order.payment_details))
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to insert order for user {}: {:?}",
                    order.user_id, err
                );
                RepositoryError::from(err)
            })?;

        let item_sql = format!(
            r#"
            INSERT INTO order_items (order_id, medicine_id, medicine_name, quantity, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ORDER_ITEM_COLUMNS}
            "#
        );

        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let line = sqlx::query_as::<_, OrderItemRecord>(&item_sql)
                .bind(record.order_id)
                .bind(item.medicine_id)
                .bind(&item.medicine_name)
                .bind(item.quantity)
                .bind(item.price)
                .fetch_one(&mut *tx)
                .await
                .map_err(|err| {
                    error!(
                        "❌ Failed to insert line for medicine ID {}: {:?}",
                        item.medicine_id, err
                    );
                    RepositoryError::from(err)
                })?;
            items.push(OrderItem::from(line));
        }

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit order transaction: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order ID {} for user {} ({} lines)",
            record.order_id,
            record.user_id,
            items.len()
        );

        record.into_order(items)
    }

    async fn update_status(
        &self,
        id: i32,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE orders
            SET status = $3,
                updated_at = current_timestamp
            WHERE order_id = $1 AND status = $2
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(id)
            .bind(expected.as_str())
            .bind(status.as_str())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update status of order ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        let Some(record) = record else {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE order_id = $1)")
                    .bind(id)
                    .fetch_one(&mut *conn)
                    .await?;

            return Err(if exists {
                RepositoryError::Conflict(format!("order {id} is no longer {expected}"))
            } else {
                RepositoryError::NotFound
            });
        };

        info!("🔄 Order ID {} moved from {} to {}", id, expected, status);

        assemble(&mut *conn, vec![record])
            .await?
            .pop()
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::{decrement, quantities_by_medicine};
    use crate::{
        domain::requests::{NewOrder, NewOrderItem},
        errors::RepositoryError,
    };
    use rust_decimal::Decimal;

    fn line(medicine_id: i32, quantity: i32) -> NewOrderItem {
        NewOrderItem {
            medicine_id,
            medicine_name: format!("medicine {medicine_id}"),
            quantity,
            price: Decimal::ONE,
        }
    }

    #[test]
    fn repeated_lines_are_summed_without_wrapping() {
        let order = NewOrder {
            user_id: 1,
            items: vec![line(7, i32::MAX), line(3, 2), line(7, 1)],
            total: Decimal::ZERO,
            delivery_details: Default::default(),
            payment_details: Default::default(),
        };

        let wanted: Vec<_> = quantities_by_medicine(&order).into_iter().collect();
        assert_eq!(wanted, vec![(3, 2), (7, i64::from(i32::MAX) + 1)]);
    }

    #[test]
    fn decrement_rejects_sums_beyond_stock() {
        assert_eq!(decrement(7, 3, 3).unwrap(), 3);

        let err = decrement(7, i32::MAX, i64::from(i32::MAX) + 1).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::InsufficientStock {
                medicine_id: 7,
                available: i32::MAX
            }
        ));
    }
}
