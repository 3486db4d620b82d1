use crate::models::{FileRecord, JsonMap, StorageType};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the files table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<i64>,
    pub storage_type: StorageType,
    pub storage_path: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub metadata: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Serialize an opaque metadata map into its JSONB column value
pub(crate) fn metadata_to_json(metadata: Option<JsonMap>) -> Option<Json> {
    metadata.map(Json::Object)
}

/// Deserialize a JSONB column value back into the metadata map.
/// Anything that is not a JSON object maps to `None`.
pub(crate) fn metadata_from_json(value: Option<Json>) -> Option<JsonMap> {
    match value {
        Some(Json::Object(map)) => Some(map),
        _ => None,
    }
}

// Conversion from Sea-ORM Model to domain FileRecord
impl From<Model> for FileRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            filename: model.filename,
            content_type: model.content_type,
            size: model.size,
            storage_type: model.storage_type,
            storage_path: model.storage_path,
            metadata: metadata_from_json(model.metadata),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Conversion from domain CreateFileRecord to Sea-ORM ActiveModel
impl From<crate::models::CreateFileRecord> for ActiveModel {
    fn from(input: crate::models::CreateFileRecord) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: Set(input.id),
            filename: Set(input.filename),
            content_type: Set(input.content_type),
            size: Set(input.size),
            storage_type: Set(input.storage_type),
            storage_path: Set(input.storage_path),
            metadata: Set(metadata_to_json(input.metadata)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_round_trips_through_json_column() {
        let mut map = JsonMap::new();
        map.insert("source".to_string(), json!("upload"));
        map.insert("nested".to_string(), json!({"a": [1, 2, 3]}));

        let column = metadata_to_json(Some(map.clone()));
        let restored = metadata_from_json(column);

        assert_eq!(restored, Some(map));
    }

    #[test]
    fn test_metadata_non_object_maps_to_none() {
        assert_eq!(metadata_from_json(Some(json!("not an object"))), None);
        assert_eq!(metadata_from_json(None), None);
    }
}
