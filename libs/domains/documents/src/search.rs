//! Similarity search over stored document embeddings
//!
//! Exhaustive: every embedded record is scored against the query vector.
//! Ranking is a stable descending sort, truncated to `limit`, then filtered
//! by the optional threshold.

use tracing::instrument;

use crate::error::{DocumentError, DocumentResult};
use crate::models::{Document, SearchOptions};
use crate::repository::DocumentRepository;
use crate::service::DocumentService;
use domain_files::FileRepository;
use validator::Validate;

/// Cosine similarity of two vectors: `dot(a,b) / (|a|*|b|)`
///
/// Zero-magnitude input yields 0.0, never a division by zero or NaN. Fails
/// when the vectors differ in length; wrong numbers are never silently
/// produced.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> DocumentResult<f32> {
    if a.len() != b.len() {
        return Err(DocumentError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

impl<R: DocumentRepository, F: FileRepository> DocumentService<R, F> {
    /// Find the documents most semantically similar to a query string
    ///
    /// Requires a configured embedding provider; fails with a configuration
    /// error otherwise so callers can prompt for setup rather than treat it
    /// as an internal failure. Candidates are records whose stored embedding
    /// matches the query vector's dimension. The threshold applies to the
    /// already-truncated top-`limit` set; matches beyond `limit` never enter
    /// consideration. Content is fetched best-effort per result.
    #[instrument(skip(self, query), fields(limit = options.limit))]
    pub async fn search_documents(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> DocumentResult<Vec<Document>> {
        options
            .validate()
            .map_err(|e| DocumentError::Validation(e.to_string()))?;

        let embedder = self.embedder().ok_or_else(|| {
            DocumentError::Config("No embedding provider configured".to_string())
        })?;

        let query_vector = embedder.embed(query).await?.vector;

        let records = self.repository().list().await?;

        let mut scored = Vec::new();
        for record in records {
            let Some(vector) = record.embedding.as_ref() else {
                continue;
            };
            if vector.is_empty() || vector.len() != query_vector.len() {
                continue;
            }

            let similarity = cosine_similarity(&query_vector, vector)?;
            scored.push((record, similarity));
        }

        // Stable sort: equal similarities keep enumeration order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(options.limit);

        if let Some(threshold) = options.threshold {
            scored.retain(|(_, similarity)| *similarity >= threshold);
        }

        let mut documents = Vec::with_capacity(scored.len());
        for (record, _) in scored {
            let content = self.fetch_content(&record).await?;
            documents.push(Document::from_record(record, content));
        }

        Ok(documents)
    }
}


#[cfg(test)]
mod search_tests {
    use super::*;
    use crate::models::DocumentRecord;
    use crate::repository::MockDocumentRepository;
    use crate::service::{DocumentServiceConfig, DocumentService};
    use chrono::Utc;
    use domain_embeddings::{Embedding, MockEmbedder};
    use domain_files::{FileError, FileService, MockFileRepository, MockStorageBackend, StorageConfig};
    use std::sync::Arc;
    use uuid::Uuid;

    /// Unit vector whose cosine against [1, 0] is exactly `c`
    fn unit_vector(c: f32) -> Vec<f32> {
        vec![c, (1.0 - c * c).sqrt()]
    }

    fn embedded_record(embedding: Option<Vec<f32>>) -> DocumentRecord {
        let now = Utc::now();
        DocumentRecord {
            id: Uuid::now_v7(),
            title: None,
            file_id: Uuid::now_v7(),
            embedding_model: embedding.as_ref().map(|_| "test-model".to_string()),
            embedding_provider: embedding.as_ref().map(|_| "test".to_string()),
            embedding,
            metadata: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn query_embedder() -> MockEmbedder {
        let mut embedder = MockEmbedder::new();
        embedder.expect_embed().returning(|_| {
            Ok(Embedding {
                vector: vec![1.0, 0.0],
                model: "test-model".to_string(),
                provider: "test".to_string(),
            })
        });
        embedder
    }

    fn service_with(
        records: Vec<DocumentRecord>,
        embedder: MockEmbedder,
        backend: MockStorageBackend,
    ) -> DocumentService<MockDocumentRepository, MockFileRepository> {
        let mut doc_repo = MockDocumentRepository::new();
        doc_repo
            .expect_list()
            .returning(move || Ok(records.clone()));

        let files = FileService::with_backend(
            MockFileRepository::new(),
            StorageConfig::Local {
                path: "/tmp/blobs".into(),
            },
            Arc::new(backend),
        );

        DocumentService::new(doc_repo, files)
            .with_config(DocumentServiceConfig {
                embedding_dimension: 2,
            })
            .with_embedder(Arc::new(embedder))
    }

    fn content_backend() -> MockStorageBackend {
        let mut backend = MockStorageBackend::new();
        backend
            .expect_retrieve()
            .returning(|_| Ok(b"content".to_vec()));
        backend
    }

    #[tokio::test]
    async fn test_search_orders_by_similarity_and_truncates() {
        let high = embedded_record(Some(unit_vector(0.9)));
        let mid = embedded_record(Some(unit_vector(0.5)));
        let low = embedded_record(Some(unit_vector(0.1)));
        let (high_id, mid_id) = (high.id, mid.id);

        let service = service_with(
            vec![low, high, mid],
            query_embedder(),
            content_backend(),
        );

        let results = service
            .search_documents("query", SearchOptions::default().with_limit(2))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, high_id);
        assert_eq!(results[1].id, mid_id);
    }

    #[tokio::test]
    async fn test_search_threshold_drops_low_similarity() {
        let high = embedded_record(Some(unit_vector(0.9)));
        let mid = embedded_record(Some(unit_vector(0.5)));
        let low = embedded_record(Some(unit_vector(0.1)));
        let high_id = high.id;

        let service = service_with(
            vec![high, mid, low],
            query_embedder(),
            content_backend(),
        );

        let results = service
            .search_documents(
                "query",
                SearchOptions::default().with_limit(10).with_threshold(0.6),
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, high_id);
    }

    #[tokio::test]
    async fn test_search_threshold_applies_after_truncation() {
        // All three clear the threshold, but only the top two survive the
        // limit; the 0.7 candidate never enters consideration.
        let records = vec![
            embedded_record(Some(unit_vector(0.9))),
            embedded_record(Some(unit_vector(0.8))),
            embedded_record(Some(unit_vector(0.7))),
        ];
        let expected: Vec<Uuid> = records[..2].iter().map(|r| r.id).collect();

        let service = service_with(records, query_embedder(), content_backend());

        let results = service
            .search_documents(
                "query",
                SearchOptions::default().with_limit(2).with_threshold(0.6),
            )
            .await
            .unwrap();

        let ids: Vec<Uuid> = results.iter().map(|d| d.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_search_ties_keep_enumeration_order() {
        let first = embedded_record(Some(unit_vector(0.5)));
        let second = embedded_record(Some(unit_vector(0.5)));
        let expected = vec![first.id, second.id];

        let service = service_with(
            vec![first, second],
            query_embedder(),
            content_backend(),
        );

        let results = service
            .search_documents("query", SearchOptions::default())
            .await
            .unwrap();

        let ids: Vec<Uuid> = results.iter().map(|d| d.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_search_skips_unembedded_and_mismatched_candidates() {
        let matching = embedded_record(Some(unit_vector(0.9)));
        let matching_id = matching.id;
        let records = vec![
            embedded_record(None),
            embedded_record(Some(vec![])),
            embedded_record(Some(vec![0.1, 0.2, 0.3])), // wrong dimension
            matching,
        ];

        let service = service_with(records, query_embedder(), content_backend());

        let results = service
            .search_documents("query", SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, matching_id);
    }

    #[tokio::test]
    async fn test_search_without_embedder_is_config_error() {
        let mut doc_repo = MockDocumentRepository::new();
        doc_repo.expect_list().times(0);

        let files = FileService::with_backend(
            MockFileRepository::new(),
            StorageConfig::Local {
                path: "/tmp/blobs".into(),
            },
            Arc::new(MockStorageBackend::new()),
        );
        let service = DocumentService::new(doc_repo, files);

        let err = service
            .search_documents("query", SearchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::Config(_)));
    }

    #[tokio::test]
    async fn test_search_degrades_missing_content() {
        let record = embedded_record(Some(unit_vector(0.9)));
        let file_id = record.file_id;

        let mut backend = MockStorageBackend::new();
        backend
            .expect_retrieve()
            .returning(move |_| Err(FileError::NotFound(file_id)));

        let service = service_with(vec![record], query_embedder(), backend);

        let results = service
            .search_documents("query", SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].content.is_none());
    }

    #[tokio::test]
    async fn test_search_rejects_zero_limit() {
        let service = service_with(vec![], query_embedder(), MockStorageBackend::new());

        let err = service
            .search_documents("query", SearchOptions::default().with_limit(0))
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::Validation(_)));
    }
}
