use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use super::StorageBackend;
use crate::error::{FileError, FileResult};

/// Blob storage over a local directory; one file per blob, named by id
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn blob_path(&self, id: Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn save(&self, id: Uuid, content: &[u8]) -> FileResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| FileError::Storage(format!("Failed to create {}: {}", self.root.display(), e)))?;

        tokio::fs::write(self.blob_path(id), content)
            .await
            .map_err(|e| FileError::Storage(format!("Failed to write blob {}: {}", id, e)))
    }

    async fn retrieve(&self, id: Uuid) -> FileResult<Vec<u8>> {
        tokio::fs::read(self.blob_path(id)).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FileError::NotFound(id)
            } else {
                FileError::Storage(format!("Failed to read blob {}: {}", id, e))
            }
        })
    }

    async fn delete(&self, id: Uuid) -> FileResult<()> {
        tokio::fs::remove_file(self.blob_path(id)).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FileError::NotFound(id)
            } else {
                FileError::Storage(format!("Failed to delete blob {}: {}", id, e))
            }
        })
    }
}
