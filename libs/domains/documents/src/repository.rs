use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DocumentResult;
use crate::models::{CreateDocumentRecord, DocumentRecord, UpdateDocumentRecord};

/// Repository trait for document record persistence
///
/// Returns plain records; storage engine details stay behind the
/// implementation.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Create a new document record
    async fn create(&self, input: CreateDocumentRecord) -> DocumentResult<DocumentRecord>;

    /// Get a document record by ID
    async fn get_by_id(&self, id: Uuid) -> DocumentResult<Option<DocumentRecord>>;

    /// Get the document record owning a file record
    async fn get_by_file_id(&self, file_id: Uuid) -> DocumentResult<Option<DocumentRecord>>;

    /// List all document records
    async fn list(&self) -> DocumentResult<Vec<DocumentRecord>>;

    /// Patch an existing document record; `None` if the record does not exist
    async fn update(
        &self,
        id: Uuid,
        input: UpdateDocumentRecord,
    ) -> DocumentResult<Option<DocumentRecord>>;

    /// Delete a document record by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> DocumentResult<bool>;
}
