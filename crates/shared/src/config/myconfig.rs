use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
        run_migrations: bool,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub jwt_secret: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub otel_endpoint: Option<String>,
    pub dev_mode: bool,
    pub enable_file_log: bool,
    pub admin: Option<AdminSeed>,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = match get("STORAGE").as_deref().unwrap_or("postgres") {
            "postgres" => {
                let database_url = get("DATABASE_URL")
                    .context("Missing environment variable: DATABASE_URL")?;

                let max_connections = match get("DB_MAX_CONNECTIONS") {
                    Some(raw) => raw
                        .parse::<u32>()
                        .context("DB_MAX_CONNECTIONS must be a valid u32 integer")?,
                    None => 5,
                };

                let run_migrations = match get("RUN_MIGRATIONS").as_deref() {
                    None => true,
                    Some(raw) => parse_bool("RUN_MIGRATIONS", raw)?,
                };

                StorageBackend::Postgres {
                    database_url,
                    max_connections,
                    run_migrations,
                }
            }
            "memory" => StorageBackend::Memory,
            other => {
                return Err(anyhow!(
                    "STORAGE must be 'postgres' or 'memory', got '{}'",
                    other
                ));
            }
        };

        let jwt_secret = get("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid u16 integer")?,
            None => 5000,
        };

        let upload_dir = PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| "uploads".into()));

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a valid integer")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let dev_mode = get("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let enable_file_log = get("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        let admin = match (get("ADMIN_EMAIL"), get("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            (None, None) => None,
            _ => {
                return Err(anyhow!(
                    "ADMIN_EMAIL and ADMIN_PASSWORD must be set together"
                ));
            }
        };

        Ok(Self {
            storage,
            jwt_secret,
            port,
            upload_dir,
            max_upload_bytes,
            otel_endpoint: get("OTEL_ENDPOINT"),
            dev_mode,
            enable_file_log,
            admin,
        })
    }

    /// Configuration for tests and local experiments: in-memory storage,
    /// uploads under `upload_dir`.
    pub fn in_memory(jwt_secret: &str, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageBackend::Memory,
            jwt_secret: jwt_secret.to_string(),
            port: 0,
            upload_dir: upload_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            otel_endpoint: None,
            dev_mode: true,
            enable_file_log: false,
            admin: None,
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{} must be 'true' or 'false', got '{}'", key, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn postgres_is_the_default_backend() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/pharmacy"),
            ("JWT_SECRET", "secret"),
        ])
        .unwrap();

        assert_eq!(
            config.storage,
            StorageBackend::Postgres {
                database_url: "postgres://localhost/pharmacy".into(),
                max_connections: 5,
                run_migrations: true,
            }
        );
        assert_eq!(config.port, 5000);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.admin.is_none());
    }

    #[test]
    fn memory_backend_needs_no_database_url() {
        let config = config_from(&[
            ("STORAGE", "memory"),
            ("JWT_SECRET", "secret"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_secret_is_reported() {
        let err = config_from(&[("STORAGE", "memory")]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("STORAGE", "mongo"), ("JWT_SECRET", "s")]).is_err());
        assert!(
            config_from(&[("STORAGE", "memory"), ("JWT_SECRET", "s"), ("PORT", "http")]).is_err()
        );
        assert!(
            config_from(&[
                ("DATABASE_URL", "postgres://x"),
                ("JWT_SECRET", "s"),
                ("RUN_MIGRATIONS", "yes"),
            ])
            .is_err()
        );
        assert!(
            config_from(&[
                ("STORAGE", "memory"),
                ("JWT_SECRET", "s"),
                ("ADMIN_EMAIL", "admin@pharmacy.test"),
            ])
            .is_err()
        );
    }
}
