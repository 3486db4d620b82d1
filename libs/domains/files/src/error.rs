use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum FileError {
    /// The requested blob or file record does not exist. Not a failure;
    /// callers decide whether to degrade or propagate.
    #[error("File not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage configuration error: {0}")]
    Config(String),

    /// External storage I/O failure, distinct from a missing blob
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type FileResult<T> = Result<T, FileError>;
