use async_trait::async_trait;
use std::{io, sync::Arc};

pub type DynFileStorage = Arc<dyn FileStorageTrait + Send + Sync>;

/// Blob storage for uploaded files, addressed by a flat file name.
#[async_trait]
pub trait FileStorageTrait {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<()>;
    async fn remove(&self, file_name: &str) -> io::Result<()>;
}
