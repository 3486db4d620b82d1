use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use uuid::Uuid;

use super::{from_object_store_error, StorageBackend};
use crate::error::{FileError, FileResult};

/// Blob storage over an S3-compatible bucket
pub struct S3Storage {
    store: AmazonS3,
}

impl S3Storage {
    pub fn new(
        bucket: &str,
        region: &str,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> FileResult<Self> {
        let store = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_region(region)
            .with_access_key_id(access_key_id)
            .with_secret_access_key(secret_access_key)
            .build()
            .map_err(|e| FileError::Config(format!("Invalid S3 storage config: {}", e)))?;

        Ok(Self { store })
    }

    fn blob_path(id: Uuid) -> Path {
        Path::from(id.to_string())
    }
}

#[async_trait]
impl StorageBackend for S3Storage {
    async fn save(&self, id: Uuid, content: &[u8]) -> FileResult<()> {
        self.store
            .put(&Self::blob_path(id), PutPayload::from(content.to_vec()))
            .await
            .map_err(|e| FileError::Storage(format!("Failed to write blob {}: {}", id, e)))?;
        Ok(())
    }

    async fn retrieve(&self, id: Uuid) -> FileResult<Vec<u8>> {
        let result = self
            .store
            .get(&Self::blob_path(id))
            .await
            .map_err(|e| from_object_store_error(id, e))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| FileError::Storage(format!("Failed to read blob {}: {}", id, e)))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, id: Uuid) -> FileResult<()> {
        self.store
            .delete(&Self::blob_path(id))
            .await
            .map_err(|e| from_object_store_error(id, e))
    }
}
