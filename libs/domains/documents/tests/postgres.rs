//! End-to-end lifecycle tests against a real PostgreSQL container and a
//! local blob directory
//!
//! Run with `cargo test -- --ignored` when Docker is available.

use domain_documents::{
    CreateDocument, DocumentError, DocumentService, PgDocumentRepository, SearchOptions,
    UpdateDocument,
};
use domain_files::{FileError, FileService, PgFileRepository, StorageConfig};
use serde_json::json;
use test_utils::TestDatabase;

async fn service(
    db: &TestDatabase,
    blob_dir: &std::path::Path,
) -> DocumentService<PgDocumentRepository, PgFileRepository> {
    let files = FileService::new(
        PgFileRepository::new(db.connection()),
        StorageConfig::Local {
            path: blob_dir.to_path_buf(),
        },
    )
    .unwrap();

    DocumentService::new(PgDocumentRepository::new(db.connection()), files)
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_document_lifecycle_round_trip() {
    let db = TestDatabase::new().await;
    let blob_dir = tempfile::tempdir().unwrap();
    let service = service(&db, blob_dir.path()).await;

    // Create without an embedding provider: content survives, embedding
    // fields stay absent
    let created = service
        .create_document(CreateDocument::new("hello world").with_title("Greeting"))
        .await
        .unwrap();
    assert!(created.embedding.is_none());
    assert!(created.embedding_model.is_none());

    let fetched = service.get_document(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.content_text().as_deref(), Some("hello world"));
    assert_eq!(fetched.title.as_deref(), Some("Greeting"));
    assert_eq!(fetched.created_at, fetched.updated_at);

    // Update content: same id, new content, old blob no longer retrievable
    let old_file_id = fetched.file_id;
    let updated = service
        .update_document(
            created.id,
            UpdateDocument {
                content: Some(b"goodbye world".to_vec()),
                regenerate_embedding: false,
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.content_text().as_deref(), Some("goodbye world"));
    assert_ne!(updated.file_id, old_file_id);

    let files = FileService::new(
        PgFileRepository::new(db.connection()),
        StorageConfig::Local {
            path: blob_dir.path().to_path_buf(),
        },
    )
    .unwrap();
    assert!(matches!(
        files.retrieve_file(old_file_id).await.unwrap_err(),
        FileError::NotFound(_)
    ));

    // Metadata replaces entirely
    let mut first = domain_files::JsonMap::new();
    first.insert("b".to_string(), json!(2));
    service
        .update_document(
            created.id,
            UpdateDocument {
                metadata: Some(first),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut second = domain_files::JsonMap::new();
    second.insert("a".to_string(), json!(1));
    let replaced = service
        .update_document(
            created.id,
            UpdateDocument {
                metadata: Some(second),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    let metadata = replaced.metadata.unwrap();
    assert_eq!(metadata.get("a"), Some(&json!(1)));
    assert!(!metadata.contains_key("b"));

    // Delete is permanent and idempotent
    assert!(service.delete_document(created.id).await.unwrap());
    assert!(!service.delete_document(created.id).await.unwrap());
    assert!(service.get_document(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_search_without_provider_is_config_error() {
    let db = TestDatabase::new().await;
    let blob_dir = tempfile::tempdir().unwrap();
    let service = service(&db, blob_dir.path()).await;

    let err = service
        .search_documents("query", SearchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentError::Config(_)));
}
