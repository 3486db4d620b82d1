use async_trait::async_trait;
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use uuid::Uuid;

use super::{from_object_store_error, StorageBackend};
use crate::error::{FileError, FileResult};

/// Blob storage over a Google Cloud Storage bucket
pub struct GcsStorage {
    store: GoogleCloudStorage,
}

impl GcsStorage {
    pub fn new(bucket: &str, key_filename: Option<&str>) -> FileResult<Self> {
        let mut builder = GoogleCloudStorageBuilder::new().with_bucket_name(bucket);

        if let Some(key_filename) = key_filename {
            builder = builder.with_service_account_path(key_filename);
        }

        let store = builder
            .build()
            .map_err(|e| FileError::Config(format!("Invalid GCS storage config: {}", e)))?;

        Ok(Self { store })
    }

    fn blob_path(id: Uuid) -> Path {
        Path::from(id.to_string())
    }
}

#[async_trait]
impl StorageBackend for GcsStorage {
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
