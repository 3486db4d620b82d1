use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    entity,
    error::{FileError, FileResult},
    models::{CreateFileRecord, FileRecord, UpdateFileRecord},
    repository::FileRepository,
};

pub struct PgFileRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgFileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create(&self, input: CreateFileRecord) -> FileResult<FileRecord> {
        let active_model: entity::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| FileError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(file_id = %model.id, "Created file record");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> FileResult<Option<FileRecord>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| FileError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> FileResult<Vec<FileRecord>> {
        let models = self
            .base
            .find_all()
            .await
            .map_err(|e| FileError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateFileRecord) -> FileResult<Option<FileRecord>> {
        let Some(model) = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| FileError::Internal(format!("Database error: {}", e)))?
        else {
            return Ok(None);
        };

        let mut record: FileRecord = model.into();
        record.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(record.id),
            filename: Set(record.filename.clone()),
            content_type: Set(record.content_type.clone()),
            size: Set(record.size),
            storage_type: Set(record.storage_type),
            storage_path: Set(record.storage_path.clone()),
            metadata: Set(entity::metadata_to_json(record.metadata.clone())),
            created_at: Set(record.created_at.into()),
            updated_at: Set(record.updated_at.into()),
        };

        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| FileError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(file_id = %id, "Updated file record");
        Ok(Some(updated_model.into()))
    }

    async fn delete(&self, id: Uuid) -> FileResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| FileError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(file_id = %id, "Deleted file record");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
