mod service;

pub use self::service::{
    DynUserCommandRepository, DynUserQueryRepository, UserCommandRepositoryTrait,
    UserQueryRepositoryTrait,
};
