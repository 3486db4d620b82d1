use async_trait::async_trait;

use crate::error::EmbeddingResult;
use crate::models::{Embedding, EmbeddingConfig};
use crate::ollama::OllamaEmbedder;
use crate::openai::OpenAiEmbedder;

/// Trait for embedding generation backends
///
/// Implementations wrap a concrete provider (Ollama, OpenAI) behind a
/// uniform capability surface.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Short provider identifier, recorded alongside stored vectors
    fn name(&self) -> &'static str;

    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> EmbeddingResult<Embedding>;

    /// Generate embeddings for multiple texts, preserving input order
    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Embedding>>;
}

/// Build the embedder for a configuration value.
///
/// Pure function of the `provider` tag; backends share no state.
pub fn embedder_for(config: &EmbeddingConfig) -> Box<dyn Embedder> {
    match config {
        EmbeddingConfig::Ollama { model, host } => {
            Box::new(OllamaEmbedder::new(model.clone(), host.clone()))
        }
        EmbeddingConfig::OpenAi { api_key, model } => {
            Box::new(OpenAiEmbedder::new(api_key.clone(), model.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_for_ollama() {
        let config = EmbeddingConfig::Ollama {
            model: "nomic-embed-text".to_string(),
            host: None,
        };
        let embedder = embedder_for(&config);
        assert_eq!(embedder.name(), "ollama");
    }

    #[test]
    fn test_embedder_for_openai() {
        let config = EmbeddingConfig::OpenAi {
            api_key: "sk-test".to_string(),
            model: None,
        };
        let embedder = embedder_for(&config);
        assert_eq!(embedder.name(), "openai");
    }
}
