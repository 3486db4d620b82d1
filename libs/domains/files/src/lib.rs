//! Files Domain
//!
//! Durable blob storage plus the relational file records that describe each
//! blob. Content bytes live in one of several storage backends selected by a
//! tagged [`StorageConfig`] value:
//!
//! - **Local** - a directory on the local filesystem
//! - **S3** - S3-compatible object storage
//! - **Gcs** - Google Cloud Storage
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ FileService  │  ← Blob + record orchestration
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐      ┌────────────────┐
//! │FileRepository│      │ StorageBackend │
//! │   (trait)    │      │    (trait)     │
//! └──────┬───────┘      └───────┬────────┘
//!        │                      │
//! ┌──────▼───────┐      ┌───────▼────────┐
//! │PgFileRepo    │      │ Local/S3/Gcs   │
//! └──────────────┘      └────────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod storage;

pub use error::{FileError, FileResult};
pub use models::{
    CreateFileRecord, FileRecord, JsonMap, StorageConfig, StorageType, UpdateFileRecord,
    UploadOptions,
};
pub use postgres::PgFileRepository;
pub use repository::FileRepository;
pub use service::FileService;
pub use storage::{backend_for, StorageBackend};

#[cfg(any(test, feature = "mock"))]
pub use repository::MockFileRepository;
#[cfg(any(test, feature = "mock"))]
pub use storage::MockStorageBackend;
