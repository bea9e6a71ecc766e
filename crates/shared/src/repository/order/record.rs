use crate::{
    errors::RepositoryError,
    model::{DeliveryDetails, Order, OrderItem, PaymentDetails},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, types::Json};
use std::collections::HashMap;

pub(super) const ORDER_COLUMNS: &str = "order_id, user_id, total, status, delivery_details, \
     payment_details, created_at, updated_at";

pub(super) const ORDER_ITEM_COLUMNS: &str =
    "order_item_id, order_id, medicine_id, medicine_name, quantity, price";

#[derive(Debug, FromRow)]
pub(super) struct OrderRecord {
    pub order_id: i32,
    pub user_id: i32,
    pub total: Decimal,
    pub status: String,
    pub delivery_details: Json<DeliveryDetails>,
    pub payment_details: Json<PaymentDetails>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, FromRow)]
pub(super) struct OrderItemRecord {
    pub order_item_id: i32,
    pub order_id: i32,
    pub medicine_id: i32,
    pub medicine_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<OrderItemRecord> for OrderItem {
    fn from(record: OrderItemRecord) -> Self {
        OrderItem {
            order_item_id: record.order_item_id,
            medicine_id: record.medicine_id,
            medicine_name: record.medicine_name,
            quantity: record.quantity,
            price: record.price,
        }
    }
}

impl OrderRecord {
    pub fn into_order(self, items: Vec<OrderItem>) -> Result<Order, RepositoryError> {
        let status = self.status.parse().map_err(|err: String| {
            RepositoryError::Corrupted(format!("order {}: {err}", self.order_id))
        })?;

        Ok(Order {
            order_id: self.order_id,
            user_id: self.user_id,
            items,
            total: self.total,
            status,
            delivery_details: self.delivery_details.0,
            payment_details: self.payment_details.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Fetches the line items of every listed order, grouped by order id.
pub(super) async fn load_items(
    conn: &mut PgConnection,
    order_ids: &[i32],
) -> Result<HashMap<i32, Vec<OrderItem>>, RepositoryError> {
    let mut grouped: HashMap<i32, Vec<OrderItem>> = HashMap::new();

    if order_ids.is_empty() {
        return Ok(grouped);
    }

    let sql = format!(
        "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1) ORDER BY order_item_id"
    );

    let records = sqlx::query_as::<_, OrderItemRecord>(&sql)
        .bind(order_ids)
        .fetch_all(conn)
        .await?;

    for record in records {
        grouped
            .entry(record.order_id)
            .or_default()
            .push(OrderItem::from(record));
    }

    Ok(grouped)
}

/// Joins order rows with their items, keeping the row order.
pub(super) async fn assemble(
    conn: &mut PgConnection,
    records: Vec<OrderRecord>,
) -> Result<Vec<Order>, RepositoryError> {
    let ids: Vec<i32> = records.iter().map(|r| r.order_id).collect();
    let mut items = load_items(conn, &ids).await?;

    records
        .into_iter()
        .map(|record| {
            let lines = items.remove(&record.order_id).unwrap_or_default();
            record.into_order(lines)
        })
        .collect()
}
