mod service;

pub use self::service::{
    DynIdentityService, DynLoginService, DynRegisterService, IdentityServiceTrait,
    LoginServiceTrait, RegisterServiceTrait,
};
