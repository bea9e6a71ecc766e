use crate::{
    abstract_trait::{DynFileStorage, DynHashing, DynJwtService, DynPrescriptionService},
    config::ConnectionPool,
    repository::{
        MedicineRepository, MemoryStore, OrderRepository, PrescriptionRepository, UserRepository,
    },
    service::{
        AuthService, AuthServiceDeps, MedicineService, OrderService, OrderServiceDeps,
        PrescriptionService, PrescriptionServiceDeps,
    },
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

/// Every repository the services need, backed by one store.
#[derive(Clone)]
pub struct Repositories {
    pub medicine: MedicineRepository,
    pub order: OrderRepository,
    pub user: UserRepository,
    pub prescription: PrescriptionRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            medicine: MedicineRepository::new(pool.clone()),
            order: OrderRepository::new(pool.clone()),
            user: UserRepository::new(pool.clone()),
            prescription: PrescriptionRepository::new(pool),
        }
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            medicine: MedicineRepository::in_memory(store.clone()),
            order: OrderRepository::in_memory(store.clone()),
            user: UserRepository::in_memory(store.clone()),
            prescription: PrescriptionRepository::in_memory(store),
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: AuthService,
    pub medicine_service: MedicineService,
    pub order_service: OrderService,
    pub prescription_service: DynPrescriptionService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("medicine_service", &self.medicine_service)
            .field("order_service", &self.order_service)
            .field("prescription_service", &"<PrescriptionService>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub file_storage: DynFileStorage,
    pub max_upload_bytes: usize,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            repositories,
            hash,
            jwt_config,
            file_storage,
            max_upload_bytes,
            registry,
        } = deps;

        let Repositories {
            medicine,
            order,
            user,
            prescription,
        } = repositories;

        let auth_service = AuthService::new(AuthServiceDeps {
            hash,
            jwt: jwt_config,
            user_query: user.query,
            user_command: user.command,
            registry: registry.clone(),
        })
        .await;

        let medicine_service =
            MedicineService::new(medicine.query.clone(), medicine.command, registry.clone())
                .await;

        let order_service = OrderService::new(OrderServiceDeps {
            query: order.query,
            command: order.command,
            medicine_query: medicine.query,
            registry: registry.clone(),
        })
        .await;

        let prescription_service = Arc::new(
            PrescriptionService::new(PrescriptionServiceDeps {
                repo: prescription.repo,
                storage: file_storage,
                max_upload_bytes,
                registry,
            })
            .await,
        ) as DynPrescriptionService;

        Self {
            auth_service,
            medicine_service,
            order_service,
            prescription_service,
        }
    }
}
