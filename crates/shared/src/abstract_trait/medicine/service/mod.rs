mod command;
mod query;

pub use self::command::{
    DynMedicineCommandRepository, DynMedicineCommandService, MedicineCommandRepositoryTrait,
    MedicineCommandServiceTrait,
};
pub use self::query::{
    DynMedicineQueryRepository, DynMedicineQueryService, MedicineQueryRepositoryTrait,
    MedicineQueryServiceTrait,
};
