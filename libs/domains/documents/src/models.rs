use chrono::{DateTime, Utc};
use domain_files::JsonMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A document record - what the relational store holds for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique identifier
    pub id: Uuid,
    /// Optional display title
    pub title: Option<String>,
    /// File record owning the content blob
    pub file_id: Uuid,
    /// Model that produced the stored vector; set together with
    /// `embedding_provider`
    pub embedding_model: Option<String>,
    /// Provider that produced the stored vector
    pub embedding_provider: Option<String>,
    /// Stored embedding vector
    pub embedding: Option<Vec<f32>>,
    /// Opaque caller metadata
    pub metadata: Option<JsonMap>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A fully assembled document: its record plus the content bytes
///
/// `content` is fetched from blob storage on read and is absent when the
/// blob is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: Option<String>,
    pub file_id: Uuid,
    pub content: Option<Vec<u8>>,
    pub embedding_model: Option<String>,
    pub embedding_provider: Option<String>,
    pub embedding: Option<Vec<f32>>,
    pub metadata: Option<JsonMap>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn from_record(record: DocumentRecord, content: Option<Vec<u8>>) -> Self {
        Self {
            id: record.id,
            title: record.title,
            file_id: record.file_id,
            content,
            embedding_model: record.embedding_model,
            embedding_provider: record.embedding_provider,
            embedding: record.embedding,
            metadata: record.metadata,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Content decoded as UTF-8, lossily
    pub fn content_text(&self) -> Option<std::borrow::Cow<'_, str>> {
        self.content.as_deref().map(String::from_utf8_lossy)
    }
}

fn default_true() -> bool {
    true
}

/// DTO for creating a document
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDocument {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Vec<u8>,
    pub title: Option<String>,
    pub metadata: Option<JsonMap>,
    /// Generate an embedding when a provider is configured
    #[serde(default = "default_true")]
    pub generate_embedding: bool,
}

impl CreateDocument {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            title: None,
            metadata: None,
            generate_embedding: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, metadata: JsonMap) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn without_embedding(mut self) -> Self {
        self.generate_embedding = false;
        self
    }
}

/// DTO for updating a document
///
/// Absent fields are left untouched. `metadata`, when provided, replaces the
/// stored mapping entirely.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDocument {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<Vec<u8>>,
    pub title: Option<String>,
    pub metadata: Option<JsonMap>,
    /// Regenerate the embedding when content is replaced and a provider is
    /// configured
    #[serde(default = "default_true")]
    pub regenerate_embedding: bool,
}

impl Default for UpdateDocument {
    fn default() -> Self {
        Self {
            content: None,
            title: None,
            metadata: None,
            regenerate_embedding: true,
        }
    }
}

/// DTO for inserting a document record
#[derive(Debug, Clone)]
pub struct CreateDocumentRecord {
    pub id: Uuid,
    pub title: Option<String>,
    pub file_id: Uuid,
    pub embedding_model: Option<String>,
    pub embedding_provider: Option<String>,
    pub embedding: Option<Vec<f32>>,
    pub metadata: Option<JsonMap>,
}

/// DTO for patching a document record
///
/// Outer `Option` distinguishes "leave untouched" from "set"; the inner
/// `Option` carries the new value, `None` meaning "clear".
#[derive(Debug, Clone, Default)]
pub struct UpdateDocumentRecord {
    pub title: Option<String>,
    pub file_id: Option<Uuid>,
    pub embedding_model: Option<Option<String>>,
    pub embedding_provider: Option<Option<String>>,
    pub embedding: Option<Option<Vec<f32>>>,
    pub metadata: Option<Option<JsonMap>>,
}

impl DocumentRecord {
    /// Apply a patch, touching `updated_at`
    pub fn apply_update(&mut self, update: UpdateDocumentRecord) {
        if let Some(title) = update.title {
            self.title = Some(title);
        }
        if let Some(file_id) = update.file_id {
            self.file_id = file_id;
        }
        if let Some(embedding_model) = update.embedding_model {
            self.embedding_model = embedding_model;
        }
        if let Some(embedding_provider) = update.embedding_provider {
            self.embedding_provider = embedding_provider;
        }
        if let Some(embedding) = update.embedding {
            self.embedding = embedding;
        }
        if let Some(metadata) = update.metadata {
            self.metadata = metadata;
        }
        self.updated_at = Utc::now();
    }
}

/// Options for similarity search
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchOptions {
    /// Maximum number of documents to return
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: usize,
    /// Drop results with similarity strictly below this bound. Applied after
    /// truncation to `limit`.
    pub threshold: Option<f32>,
}

fn default_limit() -> usize {
    10
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            threshold: None,
        }
    }
}

impl SearchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }
}
