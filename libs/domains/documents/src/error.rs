use domain_embeddings::EmbeddingError;
use domain_files::FileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Embedding provider error: {0}")]
    Provider(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

impl From<FileError> for DocumentError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::NotFound(id) => DocumentError::Storage(format!("Blob {} not found", id)),
            FileError::Validation(msg) => DocumentError::Validation(msg),
            FileError::Config(msg) => DocumentError::Config(msg),
            FileError::Storage(msg) => DocumentError::Storage(msg),
            FileError::Internal(msg) => DocumentError::Internal(msg),
        }
    }
}

impl From<EmbeddingError> for DocumentError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Config(msg) => DocumentError::Config(msg),
            EmbeddingError::Provider(msg) => DocumentError::Provider(msg),
        }
    }
}
