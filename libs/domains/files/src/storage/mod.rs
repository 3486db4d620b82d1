//! Storage backends for blob content
//!
//! Each backend implements [`StorageBackend`]; [`backend_for`] maps a tagged
//! [`StorageConfig`] to its backend. Blobs are keyed by the file record id.

mod gcs;
mod local;
mod s3;

pub use gcs::GcsStorage;
pub use local::LocalStorage;
pub use s3::S3Storage;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{FileError, FileResult};
use crate::models::StorageConfig;

/// Capability surface of a blob storage backend
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Write content under the given id, overwriting any existing blob
    async fn save(&self, id: Uuid, content: &[u8]) -> FileResult<()>;

    /// Read the blob back; `NotFound` when absent, `Storage` on I/O failure
    async fn retrieve(&self, id: Uuid) -> FileResult<Vec<u8>>;

    /// Remove the blob. Removing a non-existent id is backend-defined: the
    /// local backend surfaces `NotFound`, object stores follow their
    /// service semantics.
    async fn delete(&self, id: Uuid) -> FileResult<()>;
}

/// Build the backend for a configuration value.
///
/// Pure function of the `type` tag; backends share no state.
pub fn backend_for(config: &StorageConfig) -> FileResult<Box<dyn StorageBackend>> {
    match config {
        StorageConfig::Local { path } => Ok(Box::new(LocalStorage::new(path.clone()))),
        StorageConfig::S3 {
            bucket,
            region,
            access_key_id,
            secret_access_key,
        } => Ok(Box::new(S3Storage::new(
            bucket,
            region,
            access_key_id,
            secret_access_key,
        )?)),
        StorageConfig::Gcs {
            bucket,
            key_filename,
            ..
        } => Ok(Box::new(GcsStorage::new(bucket, key_filename.as_deref())?)),
    }
}

/// Map an object_store failure onto the domain error surface
pub(crate) fn from_object_store_error(id: Uuid, err: object_store::Error) -> FileError {
    match err {
        object_store::Error::NotFound { .. } => FileError::NotFound(id),
        other => FileError::Storage(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_backend_for_local() {
        let config = StorageConfig::Local {
            path: PathBuf::from("/tmp/blobs"),
        };
        assert!(backend_for(&config).is_ok());
    }

    #[test]
    fn test_backend_for_s3() {
        let config = StorageConfig::S3 {
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: "key".to_string(),
            secret_access_key: "secret".to_string(),
        };
        assert!(backend_for(&config).is_ok());
    }
}
