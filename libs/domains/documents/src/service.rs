use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use domain_embeddings::{Embedder, Embedding};
use domain_files::{FileError, FileRepository, FileService, JsonMap, UploadOptions};

use crate::error::{DocumentError, DocumentResult};
use crate::models::{
    CreateDocument, CreateDocumentRecord, Document, DocumentRecord, UpdateDocument,
    UpdateDocumentRecord,
};
use crate::repository::DocumentRepository;

/// Embedding dimension used when none is configured
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

/// Deployment-fixed settings for the document service
#[derive(Debug, Clone)]
pub struct DocumentServiceConfig {
    /// Required length of every stored embedding vector. Provider output of
    /// any other length is rejected, never stored truncated or padded.
    pub embedding_dimension: usize,
}

impl Default for DocumentServiceConfig {
    fn default() -> Self {
        Self {
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
        }
    }
}

/// Service layer orchestrating the document lifecycle
///
/// Every operation is a self-contained sequence of collaborator calls; the
/// service keeps no state of its own between calls. The blob store and the
/// record store are not coordinated transactionally - the inconsistency
/// windows each operation leaves on partial failure are part of its
/// contract and covered by the tests.
pub struct DocumentService<R: DocumentRepository, F: FileRepository> {
    repository: Arc<R>,
    files: Arc<FileService<F>>,
    embedder: Option<Arc<dyn Embedder>>,
    config: DocumentServiceConfig,
}

impl<R: DocumentRepository, F: FileRepository> DocumentService<R, F> {
    pub fn new(repository: R, files: FileService<F>) -> Self {
        Self {
            repository: Arc::new(repository),
            files: Arc::new(files),
            embedder: None,
            config: DocumentServiceConfig::default(),
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn with_config(mut self, config: DocumentServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub(crate) fn embedder(&self) -> Option<&Arc<dyn Embedder>> {
        self.embedder.as_ref()
    }

    pub(crate) fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a document: blob write, optional embedding, record insert
    ///
    /// The content is returned in the assembled document without re-reading
    /// the blob. A record insert failure leaves the already-written blob
    /// behind; there is no compensating rollback.
    #[instrument(skip(self, input), fields(content_size = input.content.len()))]
    pub async fn create_document(&self, input: CreateDocument) -> DocumentResult<Document> {
        input
            .validate()
            .map_err(|e| DocumentError::Validation(e.to_string()))?;

        let id = Uuid::now_v7();

        let file = self
            .files
            .save_file(
                &input.content,
                UploadOptions {
                    filename: Some(format!("{}.txt", id)),
                    content_type: None,
                    metadata: Some(document_tag(id)),
                },
            )
            .await?;

        let embedding = if input.generate_embedding {
            self.generate_embedding(&input.content).await?
        } else {
            None
        };

        let record = self
            .repository
            .create(CreateDocumentRecord {
                id,
                title: input.title,
                file_id: file.id,
                embedding_model: embedding.as_ref().map(|e| e.model.clone()),
                embedding_provider: embedding.as_ref().map(|e| e.provider.clone()),
                embedding: embedding.map(|e| e.vector),
                metadata: input.metadata,
            })
            .await?;

        info!(document_id = %id, file_id = %file.id, "Created document");
        Ok(Document::from_record(record, Some(input.content)))
    }

    /// Get a document by ID; `None` when it does not exist
    ///
    /// Blob retrieval is best-effort: a missing or unreadable blob yields a
    /// document without content, never a failed call.
    #[instrument(skip(self), fields(document_id = %id))]
    pub async fn get_document(&self, id: Uuid) -> DocumentResult<Option<Document>> {
        let Some(record) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        let content = self.fetch_content(&record).await?;
        Ok(Some(Document::from_record(record, content)))
    }

    /// Update a document; `None` when it does not exist
    ///
    /// Only explicitly provided fields change. `metadata`, when provided,
    /// replaces the stored mapping entirely. When content is replaced the
    /// new blob is saved before the old one is deleted, so no failure in
    /// between leaves the document without retrievable content.
    #[instrument(skip(self, input), fields(document_id = %id))]
    pub async fn update_document(
        &self,
        id: Uuid,
        input: UpdateDocument,
    ) -> DocumentResult<Option<Document>> {
        input
            .validate()
            .map_err(|e| DocumentError::Validation(e.to_string()))?;

        let Some(existing) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut patch = UpdateDocumentRecord {
            title: input.title,
            metadata: input.metadata.map(Some),
            ..Default::default()
        };

        if let Some(content) = &input.content {
            let file = self
                .files
                .save_file(
                    content,
                    UploadOptions {
                        filename: Some(format!("{}.txt", id)),
                        content_type: None,
                        metadata: Some(document_tag(id)),
                    },
                )
                .await?;
            patch.file_id = Some(file.id);

            if let Err(e) = self.files.delete_file(existing.file_id).await {
                warn!(
                    document_id = %id,
                    file_id = %existing.file_id,
                    error = %e,
                    "Failed to delete previous blob; continuing with replacement"
                );
            }

            let embedding = if input.regenerate_embedding {
                self.generate_embedding(content).await?
            } else {
                None
            };

            match embedding {
                Some(e) => {
                    patch.embedding_model = Some(Some(e.model));
                    patch.embedding_provider = Some(Some(e.provider));
                    patch.embedding = Some(Some(e.vector));
                }
                // The stored vector no longer describes the content; clear
                // it rather than leave it stale.
                None => {
                    patch.embedding_model = Some(None);
                    patch.embedding_provider = Some(None);
                    patch.embedding = Some(None);
                }
            }
        }

        let Some(record) = self.repository.update(id, patch).await? else {
            return Ok(None);
        };

        let content = self.fetch_content(&record).await?;
        info!(document_id = %id, "Updated document");
        Ok(Some(Document::from_record(record, content)))
    }

    /// Delete a document, returning whether it existed
    ///
    /// A blob delete failure propagates and leaves the document record in
    /// place. A record delete failure after a successful blob delete leaves
    /// a dangling record; that window is accepted and not repaired here.
    #[instrument(skip(self), fields(document_id = %id))]
    pub async fn delete_document(&self, id: Uuid) -> DocumentResult<bool> {
        let Some(record) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };

        self.files.delete_file(record.file_id).await?;
        self.repository.delete(id).await?;

        info!(document_id = %id, "Deleted document");
        Ok(true)
    }

    /// List all document records (metadata only, no blob fetch)
    pub async fn list_documents(&self) -> DocumentResult<Vec<DocumentRecord>> {
        self.repository.list().await
    }

    /// Find the document owning a file record
    pub async fn get_document_by_file_id(
        &self,
        file_id: Uuid,
    ) -> DocumentResult<Option<DocumentRecord>> {
        self.repository.get_by_file_id(file_id).await
    }

    /// Embed content through the configured provider, enforcing the
    /// configured dimension
    async fn generate_embedding(&self, content: &[u8]) -> DocumentResult<Option<Embedding>> {
        let Some(embedder) = &self.embedder else {
            return Ok(None);
        };

        let text = String::from_utf8_lossy(content);
        let embedding = embedder.embed(&text).await?;

        if embedding.vector.len() != self.config.embedding_dimension {
            return Err(DocumentError::DimensionMismatch {
                expected: self.config.embedding_dimension,
                actual: embedding.vector.len(),
            });
        }

        Ok(Some(embedding))
    }

    /// Fetch blob content for a record, degrading to `None` on a missing or
    /// unreadable blob
    pub(crate) async fn fetch_content(
        &self,
        record: &DocumentRecord,
    ) -> DocumentResult<Option<Vec<u8>>> {
        match self.files.retrieve_file(record.file_id).await {
            Ok(content) => Ok(Some(content)),
            Err(FileError::NotFound(_)) => {
                warn!(
                    document_id = %record.id,
                    file_id = %record.file_id,
                    "Blob missing, returning document without content"
                );
                Ok(None)
            }
            Err(FileError::Storage(msg)) => {
                warn!(
                    document_id = %record.id,
                    file_id = %record.file_id,
                    error = %msg,
                    "Blob retrieval failed, returning document without content"
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Record metadata linking a blob back to its document
fn document_tag(id: Uuid) -> JsonMap {
    let mut map = JsonMap::new();
    map.insert(
        "document_id".to_string(),
        serde_json::Value::String(id.to_string()),
    );
    map
}
