use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScrapedContents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapedContents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScrapedContents::Source).string().not_null())
                    .col(ColumnDef::new(ScrapedContents::VideoId).string().not_null())
                    .col(ColumnDef::new(ScrapedContents::Title).string().not_null())
                    .col(ColumnDef::new(ScrapedContents::Channel).string().not_null())
                    .col(ColumnDef::new(ScrapedContents::VideoUrl).string().not_null())
                    .col(ColumnDef::new(ScrapedContents::ThumbnailUrl).string().not_null())
                    .col(
                        ColumnDef::new(ScrapedContents::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ScrapedContents::DateText).string().not_null())
                    .col(
                        ColumnDef::new(ScrapedContents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ScrapedContents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Upserts key on (source, video_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_scraped_contents_source_video")
                    .table(ScrapedContents::Table)
                    .col(ScrapedContents::Source)
                    .col(ScrapedContents::VideoId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scraped_contents_view_count")
                    .table(ScrapedContents::Table)
                    .col(ScrapedContents::ViewCount)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScrapedContents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScrapedContents {
    Table,
    Id,
    Source,
    VideoId,
    Title,
    Channel,
    VideoUrl,
    ThumbnailUrl,
    ViewCount,
    DateText,
    CreatedAt,
    UpdatedAt,
}
