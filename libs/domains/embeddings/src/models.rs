use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, EmbeddingResult};

/// Model used by the OpenAI backend when none is configured
pub const DEFAULT_OPENAI_MODEL: &str = "text-embedding-3-small";

/// Embedding backend configuration
///
/// The `provider` tag selects the backend; each variant carries only the
/// sub-configuration that backend needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum EmbeddingConfig {
    /// Locally hosted Ollama model server
    Ollama {
        model: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        host: Option<String>,
    },
    /// Hosted OpenAI embeddings API
    OpenAi {
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
    },
}

impl EmbeddingConfig {
    /// Load the embedding configuration from environment variables.
    ///
    /// Supports:
    /// - `EMBEDDINGS_OLLAMA_MODEL`: Ollama model name (uses the Ollama backend)
    /// - `EMBEDDINGS_OLLAMA_HOST`: optional Ollama host URL
    /// - `EMBEDDINGS_OPENAI_KEY`: OpenAI API key (uses the OpenAI backend)
    /// - `EMBEDDINGS_OPENAI_MODEL`: optional OpenAI model name
    ///
    /// Ollama takes priority when both are configured.
    pub fn from_env() -> EmbeddingResult<Self> {
        if let Ok(model) = std::env::var("EMBEDDINGS_OLLAMA_MODEL") {
            return Ok(Self::Ollama {
                model,
                host: std::env::var("EMBEDDINGS_OLLAMA_HOST").ok(),
            });
        }

        if let Ok(api_key) = std::env::var("EMBEDDINGS_OPENAI_KEY") {
            return Ok(Self::OpenAi {
                api_key,
                model: std::env::var("EMBEDDINGS_OPENAI_MODEL").ok(),
            });
        }

        Err(EmbeddingError::Config(
            "No embedding provider configured. Set EMBEDDINGS_OLLAMA_MODEL or EMBEDDINGS_OPENAI_KEY"
                .to_string(),
        ))
    }
}

/// A generated embedding with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// The vector itself, in provider output order
    pub vector: Vec<f32>,
    /// Model that produced the vector
    pub model: String,
    /// Provider identifier (e.g. "ollama", "openai")
    pub provider: String,
}

impl Embedding {
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}
