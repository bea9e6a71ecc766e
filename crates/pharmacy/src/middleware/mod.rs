pub mod admin;
pub mod jwt;
pub mod session;
pub mod validate;
