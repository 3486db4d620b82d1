//! Documents Domain
//!
//! Orchestrates three independently-failing collaborators into one document
//! lifecycle: blob storage for content (`domain_files`), a relational store
//! for document records, and an optional embedding backend
//! (`domain_embeddings`) for semantic search.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ DocumentService  │  ← Lifecycle orchestration + similarity search
//! └───────┬──────────┘
//!         │
//! ┌───────▼──────────┐   ┌─────────────┐   ┌──────────┐
//! │DocumentRepository│   │ FileService │   │ Embedder │
//! │     (trait)      │   │             │   │  (trait) │
//! └───────┬──────────┘   └─────────────┘   └──────────┘
//!         │
//! ┌───────▼──────────┐
//! │ PgDocumentRepo   │
//! └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_documents::{CreateDocument, DocumentService, PgDocumentRepository};
//! use domain_embeddings::{embedder_for, EmbeddingConfig};
//! use domain_files::{FileService, PgFileRepository, StorageConfig};
//! use sea_orm::Database;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let files = FileService::new(
//!     PgFileRepository::new(db.clone()),
//!     StorageConfig::Local { path: "/var/lib/docstore/blobs".into() },
//! )?;
//!
//! let embedding_config = EmbeddingConfig::from_env()?;
//! let service = DocumentService::new(PgDocumentRepository::new(db), files)
//!     .with_embedder(Arc::from(embedder_for(&embedding_config)));
//!
//! let document = service
//!     .create_document(CreateDocument::new("hello world"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod search;
pub mod service;

pub use error::{DocumentError, DocumentResult};
pub use models::{
    CreateDocument, CreateDocumentRecord, Document, DocumentRecord, SearchOptions, UpdateDocument,
    UpdateDocumentRecord,
};
pub use postgres::PgDocumentRepository;
pub use repository::DocumentRepository;
pub use search::cosine_similarity;
pub use service::{DocumentService, DocumentServiceConfig, DEFAULT_EMBEDDING_DIMENSION};

#[cfg(any(test, feature = "mock"))]
pub use repository::MockDocumentRepository;
