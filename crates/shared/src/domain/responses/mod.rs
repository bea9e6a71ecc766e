mod api;
mod medicine;
mod order;
mod prescription;
mod user;

pub use self::api::ApiResponse;
pub use self::medicine::MedicineResponse;
pub use self::order::{OrderItemResponse, OrderResponse};
pub use self::prescription::PrescriptionResponse;
pub use self::user::{AuthResponse, UserResponse};
