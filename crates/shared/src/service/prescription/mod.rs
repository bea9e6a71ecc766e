mod upload;

pub use self::upload::{PrescriptionService, PrescriptionServiceDeps};
