use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WebSearchResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WebSearchResults::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WebSearchResults::Query).string().not_null())
                    .col(ColumnDef::new(WebSearchResults::Title).string().not_null())
                    .col(
                        ColumnDef::new(WebSearchResults::SourceUrl)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WebSearchResults::ImageUrl).string())
                    .col(
                        ColumnDef::new(WebSearchResults::SourceName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WebSearchResults::Description).text())
                    .col(
                        ColumnDef::new(WebSearchResults::RelevanceScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WebSearchResults::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WebSearchResults::CachedUntil)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups always filter on (query, cached_until).
        manager
            .create_index(
                Index::create()
                    .name("idx_web_search_results_query")
                    .table(WebSearchResults::Table)
                    .col(WebSearchResults::Query)
                    .col(WebSearchResults::CachedUntil)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WebSearchResults::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WebSearchResults {
    Table,
    Id,
    Query,
    Title,
    SourceUrl,
    ImageUrl,
    SourceName,
    Description,
    RelevanceScore,
    CreatedAt,
    CachedUntil,
}
