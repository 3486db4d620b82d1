//! Embeddings Domain
//!
//! Turns text into fixed-length vectors through one of several backends,
//! selected by a tagged [`EmbeddingConfig`] value:
//!
//! - **Ollama** - a locally hosted model server
//! - **OpenAI** - the hosted embeddings API
//!
//! All backends implement the [`Embedder`] trait, so callers depend only on
//! the capability, never on a concrete provider. Adding a backend means one
//! new implementation and one new config variant.

pub mod error;
pub mod models;
mod ollama;
mod openai;
pub mod provider;

pub use error::{EmbeddingError, EmbeddingResult};
pub use models::{Embedding, EmbeddingConfig, DEFAULT_OPENAI_MODEL};
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use provider::{embedder_for, Embedder};

#[cfg(any(test, feature = "mock"))]
pub use provider::MockEmbedder;
