use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drafts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drafts::RowIdx)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Drafts::Id).string().not_null().unique_key())
                    .col(ColumnDef::new(Drafts::Title).string().not_null())
                    .col(ColumnDef::new(Drafts::ClassLabel).string().not_null())
                    .col(ColumnDef::new(Drafts::AuthorName).string().not_null())
                    .col(ColumnDef::new(Drafts::Content).text().not_null())
                    .col(
                        ColumnDef::new(Drafts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Drafts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Drafts::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // The listing sorts active drafts by recency.
        manager
            .create_index(
                Index::create()
                    .name("idx_drafts_updated_at")
                    .table(Drafts::Table)
                    .col(Drafts::UpdatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Drafts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Drafts {
    Table,
    RowIdx,
    Id,
    Title,
    ClassLabel,
    AuthorName,
    Content,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
