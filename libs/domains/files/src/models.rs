use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::Display;
use uuid::Uuid;

/// JSON object attached to records as opaque metadata
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Storage backend kind, persisted on every file record
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "storage_type")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageType {
    #[sea_orm(string_value = "local")]
    Local,
    #[sea_orm(string_value = "s3")]
    S3,
    #[sea_orm(string_value = "gcs")]
    Gcs,
}

/// Storage backend configuration
///
/// The `type` tag selects the backend; each variant carries only the
/// sub-configuration that backend needs. Shared read-only between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Blobs as files under a local directory
    Local { path: PathBuf },
    /// S3-compatible object storage
    S3 {
        bucket: String,
        region: String,
        access_key_id: String,
        secret_access_key: String,
    },
    /// Google Cloud Storage. `project_id` is informational; access rides on
    /// the service account in `key_filename`.
    Gcs {
        bucket: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_filename: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        project_id: Option<String>,
    },
}

impl StorageConfig {
    pub fn storage_type(&self) -> StorageType {
        match self {
            StorageConfig::Local { .. } => StorageType::Local,
            StorageConfig::S3 { .. } => StorageType::S3,
            StorageConfig::Gcs { .. } => StorageType::Gcs,
        }
    }
}

/// A file record - metadata about one stored blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique identifier; also the blob key inside the backend
    pub id: Uuid,
    /// Original filename, when known
    pub filename: Option<String>,
    /// MIME type, when known
    pub content_type: Option<String>,
    /// Content size in bytes
    pub size: Option<i64>,
    /// Backend the blob lives in
    pub storage_type: StorageType,
    /// Key of the blob inside the backend
    pub storage_path: String,
    /// Opaque caller metadata
    pub metadata: Option<JsonMap>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Options accompanying a blob write
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub metadata: Option<JsonMap>,
}

/// DTO for creating a file record
#[derive(Debug, Clone)]
pub struct CreateFileRecord {
    pub id: Uuid,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<i64>,
    pub storage_type: StorageType,
    pub storage_path: String,
    pub metadata: Option<JsonMap>,
}

/// DTO for patching a file record
///
/// Outer `Option` distinguishes "leave untouched" from "set"; the inner
/// `Option` carries the new value, `None` meaning "clear".
#[derive(Debug, Clone, Default)]
pub struct UpdateFileRecord {
    pub filename: Option<Option<String>>,
    pub content_type: Option<Option<String>>,
    pub size: Option<Option<i64>>,
    pub metadata: Option<Option<JsonMap>>,
}

impl FileRecord {
    /// Apply a patch, touching `updated_at`
    pub fn apply_update(&mut self, update: UpdateFileRecord) {
        if let Some(filename) = update.filename {
            self.filename = filename;
        }
        if let Some(content_type) = update.content_type {
            self.content_type = content_type;
        }
        if let Some(size) = update.size {
            self.size = size;
        }
        if let Some(metadata) = update.metadata {
            self.metadata = metadata;
        }
        self.updated_at = Utc::now();
    }
}
