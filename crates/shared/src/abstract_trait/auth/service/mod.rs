mod identity;
mod login;
mod register;

pub use self::identity::{DynIdentityService, IdentityServiceTrait};
pub use self::login::{DynLoginService, LoginServiceTrait};
pub use self::register::{DynRegisterService, RegisterServiceTrait};
