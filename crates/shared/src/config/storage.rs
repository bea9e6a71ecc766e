use crate::abstract_trait::FileStorageTrait;
use async_trait::async_trait;
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::info;

/// Stores files flat under a single directory on the local disk.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, file_name: &str) -> io::Result<PathBuf> {
        let candidate = Path::new(file_name);
        match candidate.file_name() {
            Some(name) if name == candidate.as_os_str() => Ok(self.root.join(name)),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to store outside the upload directory: {file_name}"),
            )),
        }
    }
}

#[async_trait]
impl FileStorageTrait for DiskStorage {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_for(file_name)?;
        fs::create_dir_all(&self.root).await?;
        fs::write(&path, bytes).await?;

        info!("💾 Stored {} bytes at {}", bytes.len(), path.display());
        Ok(())
    }

    async fn remove(&self, file_name: &str) -> io::Result<()> {
        let path = self.path_for(file_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_and_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(dir.path().join("prescriptions"));

        storage.save("1-scan.pdf", b"%PDF").await.unwrap();
        let stored = std::fs::read(dir.path().join("prescriptions/1-scan.pdf")).unwrap();
        assert_eq!(stored, b"%PDF");

        storage.remove("1-scan.pdf").await.unwrap();
        assert!(!dir.path().join("prescriptions/1-scan.pdf").exists());

        // removing twice is fine
        storage.remove("1-scan.pdf").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(dir.path());

        assert!(storage.save("../escape.pdf", b"x").await.is_err());
        assert!(storage.save("a/b.pdf", b"x").await.is_err());
    }
}
