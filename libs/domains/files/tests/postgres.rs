//! Repository integration tests against a real PostgreSQL container
//!
//! Run with `cargo test -- --ignored` when Docker is available.

use domain_files::{
    CreateFileRecord, FileRepository, PgFileRepository, StorageType, UpdateFileRecord,
};
use serde_json::json;
use test_utils::{TestDataBuilder, TestDatabase};
use uuid::Uuid;

fn sample_input(id: Uuid, filename: String) -> CreateFileRecord {
    let mut metadata = domain_files::JsonMap::new();
    metadata.insert("source".to_string(), json!("test"));

    CreateFileRecord {
        id,
        filename: Some(filename),
        content_type: Some("text/plain".to_string()),
        size: Some(11),
        storage_type: StorageType::Local,
        storage_path: id.to_string(),
        metadata: Some(metadata),
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_file_record_crud_round_trip() {
    let db = TestDatabase::new().await;
    let repository = PgFileRepository::new(db.connection());

    let builder = TestDataBuilder::from_test_name("test_file_record_crud_round_trip");
    let filename = builder.name("file", "sample");

    let id = Uuid::now_v7();
    let created = repository
        .create(sample_input(id, filename.clone()))
        .await
        .unwrap();
    assert_eq!(created.id, id);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repository.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(fetched.filename.as_deref(), Some(filename.as_str()));
    assert_eq!(
        fetched.metadata.unwrap().get("source"),
        Some(&json!("test"))
    );

    let updated = repository
        .update(
            id,
            UpdateFileRecord {
                filename: Some(Some("renamed.txt".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.filename.as_deref(), Some("renamed.txt"));
    assert_eq!(updated.content_type.as_deref(), Some("text/plain"));

    let all = repository.list().await.unwrap();
    assert_eq!(all.len(), 1);

    assert!(repository.delete(id).await.unwrap());
    assert!(!repository.delete(id).await.unwrap());
    assert!(repository.get_by_id(id).await.unwrap().is_none());
}
