use crate::{
    abstract_trait::{DynFileStorage, DynHashing, DynJwtService},
    config::{Config, ConnectionManager, DiskStorage, Hashing, JwtConfig, StorageBackend},
    di::{DependenciesInject, DependenciesInjectDeps, Repositories},
    repository::MemoryStore,
    utils::{ProcessMetrics, run_metrics_collector},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use std::{fmt, path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
    pub process_metrics: Arc<ProcessMetrics>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("jwt_config", &"<dyn JwtService>")
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_hashing(config, Arc::new(Hashing::new()) as DynHashing).await
    }

    /// Same as [`AppState::new`] with a caller-chosen password hasher.
    pub async fn with_hashing(config: &Config, hashing: DynHashing) -> Result<Self> {
        let repositories = match &config.storage {
            StorageBackend::Postgres {
                database_url,
                max_connections,
                run_migrations,
            } => {
                let pool = ConnectionManager::new_pool(database_url, *max_connections)
                    .await
                    .context("Failed to connect to PostgreSQL")?;

                if *run_migrations {
                    ConnectionManager::run_migrations(&pool)
                        .await
                        .context("Failed to migrate the database")?;
                }

                info!("🐘 Using PostgreSQL storage");
                Repositories::postgres(pool)
            }
            StorageBackend::Memory => {
                info!("🧠 Using in-memory storage");
                Repositories::in_memory(MemoryStore::new())
            }
        };

        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let file_storage =
            Arc::new(DiskStorage::new(config.upload_dir.join("prescriptions"))) as DynFileStorage;
        let registry = Arc::new(Mutex::new(Registry::default()));
        let process_metrics = Arc::new(ProcessMetrics::new());

        let deps = DependenciesInjectDeps {
            repositories,
            hash: hashing,
            jwt_config: jwt_config.clone(),
            file_storage,
            max_upload_bytes: config.max_upload_bytes,
            registry: registry.clone(),
        };

        let di_container = DependenciesInject::new(deps).await;

        if let Some(seed) = &config.admin {
            di_container
                .auth_service
                .register
                .ensure_admin(&seed.email, &seed.password)
                .await
                .context("Failed to bootstrap the administrator account")?;
        }

        registry.lock().await.register_metrics(&process_metrics);

        tokio::spawn(run_metrics_collector(process_metrics.clone()));

        Ok(Self {
            di_container,
            jwt_config,
            registry,
            process_metrics,
            upload_dir: config.upload_dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &ProcessMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &ProcessMetrics) {
        metrics.register(self);
    }
}
