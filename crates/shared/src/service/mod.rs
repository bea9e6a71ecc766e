mod auth;
mod medicine;
mod order;
mod prescription;

pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::medicine::MedicineService;
pub use self::order::{OrderService, OrderServiceDeps};
pub use self::prescription::{PrescriptionService, PrescriptionServiceDeps};
