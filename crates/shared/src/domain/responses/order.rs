use crate::model::{DeliveryDetails, Order, OrderItem, OrderStatus, PaymentDetails};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: i32,
    pub medicine: i32,
    pub medicine_name: String,
    pub quantity: i32,
    /// Unit price captured when the order was placed.
    #[schema(value_type = f64)]
    pub price: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        OrderItemResponse {
            id: value.order_item_id,
            medicine: value.medicine_id,
            medicine_name: value.medicine_name,
            quantity: value.quantity,
            price: value.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub user: i32,
    pub items: Vec<OrderItemResponse>,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub status: OrderStatus,
    pub delivery_details: DeliveryDetails,
    pub payment_details: PaymentDetails,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// model to response
impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.order_id,
            user: value.user_id,
            items: value.items.into_iter().map(OrderItemResponse::from).collect(),
            total: value.total,
            status: value.status,
            delivery_details: value.delivery_details,
            payment_details: value.payment_details,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}
