mod auth;
mod hashing;
mod jwt;
mod medicine;
mod order;
mod prescription;
mod storage;
mod user;

pub use self::auth::{
    DynIdentityService, DynLoginService, DynRegisterService, IdentityServiceTrait,
    LoginServiceTrait, RegisterServiceTrait,
};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::medicine::{
    DynMedicineCommandRepository, DynMedicineCommandService, DynMedicineQueryRepository,
    DynMedicineQueryService, MedicineCommandRepositoryTrait, MedicineCommandServiceTrait,
    MedicineQueryRepositoryTrait, MedicineQueryServiceTrait,
};
pub use self::order::{
    DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
    DynOrderQueryService, OrderCommandRepositoryTrait, OrderCommandServiceTrait,
    OrderQueryRepositoryTrait, OrderQueryServiceTrait,
};
pub use self::prescription::{
    DynPrescriptionRepository, DynPrescriptionService, PrescriptionRepositoryTrait,
    PrescriptionServiceTrait,
};
pub use self::storage::{DynFileStorage, FileStorageTrait};
pub use self::user::{
    DynUserCommandRepository, DynUserQueryRepository, UserCommandRepositoryTrait,
    UserQueryRepositoryTrait,
};
