use crate::model::{DeliveryDetails, OrderStatus, PaymentDetails};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemRequest {
    #[schema(example = 1)]
    pub medicine: i32,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 2)]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(
        length(min = 1, message = "Order must contain at least one item"),
        nested
    )]
    pub items: Vec<OrderItemRequest>,

    #[serde(default)]
    pub delivery_details: DeliveryDetails,

    #[serde(default)]
    pub payment_details: PaymentDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// A line item priced during validation. `price` is the unit price frozen at
/// placement time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub medicine_id: i32,
    pub medicine_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub items: Vec<NewOrderItem>,
    pub total: Decimal,
    pub delivery_details: DeliveryDetails,
    pub payment_details: PaymentDetails,
}
