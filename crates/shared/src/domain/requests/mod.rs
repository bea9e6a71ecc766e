mod auth;
mod medicine;
mod order;
mod prescription;

pub use self::auth::{LoginRequest, NewUser, RegisterRequest, UpdateProfileRequest};
pub use self::medicine::{
    CreateMedicineRequest, FindAllMedicines, MedicineFilter, UpdateMedicineRequest,
};
pub use self::order::{
    CreateOrderRequest, NewOrder, NewOrderItem, OrderItemRequest, UpdateOrderStatusRequest,
};
pub use self::prescription::{NewPrescription, UploadPrescriptionRequest};
