use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create storage_type enum
        manager
            .create_type(
                Type::create()
                    .as_enum(StorageType::Enum)
                    .values([StorageType::Local, StorageType::S3, StorageType::Gcs])
                    .to_owned(),
            )
            .await?;

        // Create files table
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(pk_uuid(Files::Id))
                    .col(string_null(Files::Filename))
                    .col(string_null(Files::ContentType))
                    .col(big_integer_null(Files::Size))
                    .col(
                        ColumnDef::new(Files::StorageType)
                            .enumeration(
                                StorageType::Enum,
                                [StorageType::Local, StorageType::S3, StorageType::Gcs],
                            )
                            .not_null(),
                    )
                    .col(string(Files::StoragePath))
                    .col(json_binary_null(Files::Metadata))
                    .col(
                        timestamp_with_time_zone(Files::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Files::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_files_storage_type")
                    .table(Files::Table)
                    .col(Files::StorageType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_files_created_at")
                    .table(Files::Table)
                    .col(Files::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Add updated_at trigger
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER files_touch_updated_at
                    BEFORE UPDATE ON files
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS files_touch_updated_at ON files")
            .await?;

        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(StorageType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Files {
    Table,
    Id,
    Filename,
    ContentType,
    Size,
    StorageType,
    StoragePath,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StorageType {
    #[sea_orm(iden = "storage_type")]
    Enum,
    #[sea_orm(iden = "local")]
    Local,
    #[sea_orm(iden = "s3")]
    S3,
    #[sea_orm(iden = "gcs")]
    Gcs,
}
