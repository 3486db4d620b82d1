use crate::models::DocumentRecord;
use domain_files::JsonMap;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the documents table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: Option<String>,
    pub file_id: Uuid,
    pub embedding_model: Option<String>,
    pub embedding_provider: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub embedding: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub metadata: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Serialize a vector into its JSONB column value
pub(crate) fn vector_to_json(vector: Vec<f32>) -> Json {
    Json::from(vector)
}

/// Deserialize a JSONB column value back into a vector.
/// Anything that is not a numeric array maps to `None`.
pub(crate) fn vector_from_json(value: Option<Json>) -> Option<Vec<f32>> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

/// Serialize an opaque metadata map into its JSONB column value
pub(crate) fn metadata_to_json(metadata: Option<JsonMap>) -> Option<Json> {
    metadata.map(Json::Object)
}

/// Deserialize a JSONB column value back into the metadata map
pub(crate) fn metadata_from_json(value: Option<Json>) -> Option<JsonMap> {
    match value {
        Some(Json::Object(map)) => Some(map),
        _ => None,
    }
}

// Conversion from Sea-ORM Model to domain DocumentRecord
impl From<Model> for DocumentRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            file_id: model.file_id,
            embedding_model: model.embedding_model,
            embedding_provider: model.embedding_provider,
            embedding: vector_from_json(model.embedding),
            metadata: metadata_from_json(model.metadata),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Conversion from domain CreateDocumentRecord to Sea-ORM ActiveModel
impl From<crate::models::CreateDocumentRecord> for ActiveModel {
    fn from(input: crate::models::CreateDocumentRecord) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: Set(input.id),
            title: Set(input.title),
            file_id: Set(input.file_id),
            embedding_model: Set(input.embedding_model),
            embedding_provider: Set(input.embedding_provider),
            embedding: Set(input.embedding.map(vector_to_json)),
            metadata: Set(metadata_to_json(input.metadata)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
