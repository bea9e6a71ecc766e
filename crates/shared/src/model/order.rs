use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Forward-only progress with a cancellation escape while the order is open.
    /// Setting the current status again is accepted as a no-op.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        if *self == next {
            return true;
        }

        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Delivered)
                | (Pending, Cancelled)
                | (Processing, Delivered)
                | (Processing, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub delivery_date: Option<String>,
    pub delivery_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: Option<String>,
    pub expiry_date: Option<String>,
    pub name_on_card: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub medicine_id: i32,
    pub medicine_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub delivery_details: DeliveryDetails,
    pub payment_details: PaymentDetails,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;
    use super::*;

    #[test]
    fn open_orders_move_forward_or_cancel() {
        assert!(Pending.can_transition_to(Processing));
        assert!(Pending.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Delivered));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(!Processing.can_transition_to(Pending));
    }

    #[test]
    fn closed_orders_are_terminal() {
        for next in [Pending, Processing, Cancelled] {
            assert!(!Delivered.can_transition_to(next));
        }
        for next in [Pending, Processing, Delivered] {
            assert!(!Cancelled.can_transition_to(next));
        }
        assert!(Delivered.can_transition_to(Delivered));
    }

    #[test]
    fn status_round_trips_through_its_wire_name() {
        for status in [Pending, Processing, Delivered, Cancelled] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
