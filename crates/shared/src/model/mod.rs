mod medicine;
mod order;
mod prescription;
mod user;

pub use self::medicine::{DEFAULT_MEDICINE_IMAGE, Medicine, MedicineCategory};
pub use self::order::{DeliveryDetails, Order, OrderItem, OrderStatus, PaymentDetails};
pub use self::prescription::Prescription;
pub use self::user::{Address, User, UserRole};
