use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create documents table. file_id references a row in files but is
        // deliberately not a foreign key: document deletion removes the file
        // record before the document record, mirroring blob-then-metadata
        // ordering, and a constraint would reject that sequence.
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(pk_uuid(Documents::Id))
                    .col(string_null(Documents::Title))
                    .col(uuid(Documents::FileId))
                    .col(string_null(Documents::EmbeddingModel))
                    .col(string_null(Documents::EmbeddingProvider))
                    .col(json_binary_null(Documents::Embedding))
                    .col(json_binary_null(Documents::Metadata))
                    .col(
                        timestamp_with_time_zone(Documents::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Documents::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_documents_file_id")
                    .table(Documents::Table)
                    .col(Documents::FileId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_created_at")
                    .table(Documents::Table)
                    .col(Documents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Add updated_at trigger
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER documents_touch_updated_at
                    BEFORE UPDATE ON documents
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
            .execute_unprepared("DROP TRIGGER IF EXISTS documents_touch_updated_at ON documents")
            .await?;

        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    Id,
    Title,
    FileId,
    EmbeddingModel,
    EmbeddingProvider,
    Embedding,
    Metadata,
    CreatedAt,
    UpdatedAt,
}
