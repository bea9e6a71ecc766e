mod service;

pub use self::service::{
    DynMedicineCommandRepository, DynMedicineCommandService, DynMedicineQueryRepository,
    DynMedicineQueryService, MedicineCommandRepositoryTrait, MedicineCommandServiceTrait,
    MedicineQueryRepositoryTrait, MedicineQueryServiceTrait,
};
