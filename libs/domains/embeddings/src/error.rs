use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding configuration error: {0}")]
    Config(String),

    #[error("Embedding provider error: {0}")]
    Provider(String),
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::Provider(err.to_string())
    }
}
