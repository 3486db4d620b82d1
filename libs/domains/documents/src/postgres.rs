use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity,
    error::{DocumentError, DocumentResult},
    models::{CreateDocumentRecord, DocumentRecord, UpdateDocumentRecord},
    repository::DocumentRepository,
};

pub struct PgDocumentRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgDocumentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn create(&self, input: CreateDocumentRecord) -> DocumentResult<DocumentRecord> {
        let active_model: entity::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(document_id = %model.id, "Created document record");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> DocumentResult<Option<DocumentRecord>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn get_by_file_id(&self, file_id: Uuid) -> DocumentResult<Option<DocumentRecord>> {
        let model = entity::Entity::find()
            .filter(entity::Column::FileId.eq(file_id))
            .one(self.base.db())
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> DocumentResult<Vec<DocumentRecord>> {
        let models = self
            .base
            .find_all()
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateDocumentRecord,
    ) -> DocumentResult<Option<DocumentRecord>> {
        let Some(model) = self
            .base
            .find_by_id(id)
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?
        else {
            return Ok(None);
        };

        let mut record: DocumentRecord = model.into();
        record.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(record.id),
            title: Set(record.title.clone()),
            file_id: Set(record.file_id),
            embedding_model: Set(record.embedding_model.clone()),
            embedding_provider: Set(record.embedding_provider.clone()),
            embedding: Set(record.embedding.clone().map(entity::vector_to_json)),
            metadata: Set(entity::metadata_to_json(record.metadata.clone())),
            created_at: Set(record.created_at.into()),
            updated_at: Set(record.updated_at.into()),
        };

        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(document_id = %id, "Updated document record");
        Ok(Some(updated_model.into()))
    }

    async fn delete(&self, id: Uuid) -> DocumentResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id)
            .await
            .map_err(|e| DocumentError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(document_id = %id, "Deleted document record");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
