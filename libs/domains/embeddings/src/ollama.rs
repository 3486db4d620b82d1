use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::Embedding;
use crate::provider::Embedder;

const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Embedder backed by a locally hosted Ollama server
pub struct OllamaEmbedder {
    client: Client,
    model: String,
    host: String,
}

impl OllamaEmbedder {
    pub fn new(model: impl Into<String>, host: Option<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            host: host.unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn embed(&self, text: &str) -> EmbeddingResult<Embedding> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::Provider("No embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        tracing::debug!(count = texts.len(), model = %self.model, "Requesting embeddings");

        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.host))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Provider(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let embed_response: EmbedResponse = response.json().await?;

        if embed_response.embeddings.len() != texts.len() {
            return Err(EmbeddingError::Provider(format!(
                "Ollama returned {} embeddings for {} inputs",
                embed_response.embeddings.len(),
                texts.len()
            )));
        }

        Ok(embed_response
            .embeddings
            .into_iter()
            .map(|vector| Embedding {
                vector,
                model: self.model.clone(),
                provider: "ollama".to_string(),
            })
            .collect())
    }
}
