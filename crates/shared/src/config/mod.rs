mod database;
mod hashing;
mod jwt;
mod myconfig;
mod storage;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::hashing::Hashing;
pub use self::jwt::{Claims, JwtConfig};
pub use self::myconfig::{AdminSeed, Config, StorageBackend};
pub use self::storage::DiskStorage;
