use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{FileError, FileResult};
use crate::models::{
    CreateFileRecord, FileRecord, StorageConfig, StorageType, UpdateFileRecord, UploadOptions,
};
use crate::repository::FileRepository;
use crate::storage::{self, StorageBackend};

/// Service layer orchestrating blob writes with their file records
///
/// The blob goes into the configured storage backend; the describing record
/// goes into the relational store. The two writes are not transactional: a
/// record insert failure leaves the already-written blob behind.
#[derive(Clone)]
pub struct FileService<R: FileRepository> {
    repository: Arc<R>,
    config: StorageConfig,
    backend: Arc<dyn StorageBackend>,
}

impl<R: FileRepository> FileService<R> {
    pub fn new(repository: R, config: StorageConfig) -> FileResult<Self> {
        let backend = storage::backend_for(&config)?;
        Ok(Self {
            repository: Arc::new(repository),
            config,
            backend: Arc::from(backend),
        })
    }

    /// Construct with an explicit backend instead of deriving one from the
    /// config tag
    pub fn with_backend(
        repository: R,
        config: StorageConfig,
        backend: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
            backend,
        }
    }

    pub fn storage_type(&self) -> StorageType {
        self.config.storage_type()
    }

    /// Write content as a new blob and create its file record
    #[instrument(skip(self, content, options), fields(size = content.len()))]
    pub async fn save_file(&self, content: &[u8], options: UploadOptions) -> FileResult<FileRecord> {
        let id = Uuid::now_v7();

        self.backend.save(id, content).await?;

        let record = self
            .repository
            .create(CreateFileRecord {
                id,
                filename: options.filename,
                content_type: options.content_type,
                size: Some(content.len() as i64),
                storage_type: self.config.storage_type(),
                storage_path: id.to_string(),
                metadata: options.metadata,
            })
            .await?;

        info!(file_id = %id, "Saved file");
        Ok(record)
    }

    /// Read a file from disk and save it, deriving the filename from the
    /// path when the options carry none
    pub async fn upload_file(&self, path: &Path, options: UploadOptions) -> FileResult<FileRecord> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| FileError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

        let filename = options.filename.clone().or_else(|| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        });

        self.save_file(&content, UploadOptions { filename, ..options })
            .await
    }

    /// Fetch blob content by file id
    ///
    /// `NotFound` and `Storage` failures stay distinct; callers choose
    /// whether to degrade or propagate.
    pub async fn retrieve_file(&self, id: Uuid) -> FileResult<Vec<u8>> {
        self.backend.retrieve(id).await
    }

    /// Delete the blob and its file record, returning whether the record
    /// existed
    ///
    /// An already-missing blob is tolerated; a real storage failure
    /// propagates and leaves the record in place.
    #[instrument(skip(self))]
    pub async fn delete_file(&self, id: Uuid) -> FileResult<bool> {
        match self.backend.delete(id).await {
            Ok(()) => {}
            Err(FileError::NotFound(_)) => {
                warn!(file_id = %id, "Blob already absent during delete");
            }
            Err(e) => return Err(e),
        }

        self.repository.delete(id).await
    }

    pub async fn get_record(&self, id: Uuid) -> FileResult<Option<FileRecord>> {
        self.repository.get_by_id(id).await
    }

    pub async fn list_records(&self) -> FileResult<Vec<FileRecord>> {
        self.repository.list().await
    }

    pub async fn update_record(
        &self,
        id: Uuid,
        input: UpdateFileRecord,
    ) -> FileResult<Option<FileRecord>> {
        self.repository.update(id, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockFileRepository;
    use crate::storage::MockStorageBackend;
    use chrono::Utc;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn record_from(input: CreateFileRecord) -> FileRecord {
        FileRecord {
            id: input.id,
            filename: input.filename,
            content_type: input.content_type,
            size: input.size,
            storage_type: input.storage_type,
            storage_path: input.storage_path,
            metadata: input.metadata,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn local_config() -> StorageConfig {
        StorageConfig::Local {
            path: std::path::PathBuf::from("/tmp/blobs"),
        }
    }

    fn service(
        repository: MockFileRepository,
        backend: MockStorageBackend,
    ) -> FileService<MockFileRepository> {
        FileService::with_backend(repository, local_config(), Arc::new(backend))
    }

    #[tokio::test]
    async fn test_save_file_writes_blob_then_record() {
        let mut backend = MockStorageBackend::new();
        let mut repository = MockFileRepository::new();
        let mut seq = Sequence::new();

        backend
            .expect_save()
            .withf(|_, content| content == b"hello world")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        repository
            .expect_create()
            .withf(|input| {
                input.size == Some(11)
                    && input.storage_type == StorageType::Local
                    && input.storage_path == input.id.to_string()
                    && input.filename.as_deref() == Some("greeting.txt")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|input| Ok(record_from(input)));

        let service = service(repository, backend);
        let record = service
            .save_file(
                b"hello world",
                UploadOptions {
                    filename: Some("greeting.txt".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(record.size, Some(11));
    }

    #[tokio::test]
    async fn test_save_file_backend_failure_creates_no_record() {
        let mut backend = MockStorageBackend::new();
        let mut repository = MockFileRepository::new();

        backend
            .expect_save()
            .returning(|_, _| Err(FileError::Storage("disk full".to_string())));
        repository.expect_create().times(0);

        let service = service(repository, backend);
        let err = service
            .save_file(b"data", UploadOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FileError::Storage(_)));
    }

    #[tokio::test]
    async fn test_retrieve_file_passes_through_backend() {
        let mut backend = MockStorageBackend::new();
        let repository = MockFileRepository::new();
        let id = Uuid::now_v7();

        backend
            .expect_retrieve()
            .with(eq(id))
            .returning(|_| Ok(b"content".to_vec()));

        let service = service(repository, backend);
        assert_eq!(service.retrieve_file(id).await.unwrap(), b"content");
    }

    #[tokio::test]
    async fn test_delete_file_removes_blob_and_record() {
        let mut backend = MockStorageBackend::new();
        let mut repository = MockFileRepository::new();
        let id = Uuid::now_v7();
        let mut seq = Sequence::new();

        backend
            .expect_delete()
            .with(eq(id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repository
            .expect_delete()
            .with(eq(id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));

        let service = service(repository, backend);
        assert!(service.delete_file(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_file_tolerates_missing_blob() {
        let mut backend = MockStorageBackend::new();
        let mut repository = MockFileRepository::new();
        let id = Uuid::now_v7();

        backend
            .expect_delete()
            .returning(move |_| Err(FileError::NotFound(id)));
        repository.expect_delete().returning(|_| Ok(true));

        let service = service(repository, backend);
        assert!(service.delete_file(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_file_storage_failure_keeps_record() {
        let mut backend = MockStorageBackend::new();
        let mut repository = MockFileRepository::new();

        backend
            .expect_delete()
            .returning(|_| Err(FileError::Storage("permission denied".to_string())));
        repository.expect_delete().times(0);

        let service = service(repository, backend);
        let err = service.delete_file(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, FileError::Storage(_)));
    }

    #[tokio::test]
    async fn test_upload_file_derives_filename_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        std::fs::write(&file_path, b"note content").unwrap();

        let mut backend = MockStorageBackend::new();
        let mut repository = MockFileRepository::new();

        backend.expect_save().returning(|_, _| Ok(()));
        repository
            .expect_create()
            .withf(|input| input.filename.as_deref() == Some("notes.txt"))
            .returning(|input| Ok(record_from(input)));

        let service = service(repository, backend);
        let record = service
            .upload_file(&file_path, UploadOptions::default())
            .await
            .unwrap();

        assert_eq!(record.filename.as_deref(), Some("notes.txt"));
        assert_eq!(record.size, Some(12));
    }
}
