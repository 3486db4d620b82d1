use async_trait::async_trait;
use uuid::Uuid;

use crate::error::FileResult;
use crate::models::{CreateFileRecord, FileRecord, UpdateFileRecord};

/// Repository trait for file record persistence
///
/// Returns plain records; storage engine details stay behind the
/// implementation.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Create a new file record
    async fn create(&self, input: CreateFileRecord) -> FileResult<FileRecord>;

    /// Get a file record by ID
    async fn get_by_id(&self, id: Uuid) -> FileResult<Option<FileRecord>>;

    /// List all file records
    async fn list(&self) -> FileResult<Vec<FileRecord>>;

    /// Patch an existing file record; `None` if the record does not exist
    async fn update(&self, id: Uuid, input: UpdateFileRecord) -> FileResult<Option<FileRecord>>;

    /// Delete a file record by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> FileResult<bool>;
}
