use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Videos::Id)
                            .string_len(20)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Videos::Title).string_len(255))
                    .col(ColumnDef::new(Videos::Description).text())
                    .col(ColumnDef::new(Videos::Length).big_integer())
                    .col(ColumnDef::new(Videos::Views).big_integer().default(0))
                    .col(ColumnDef::new(Videos::Rating).double())
                    .col(ColumnDef::new(Videos::PublishDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Videos::ThumbnailUrl).string_len(255))
                    .col(
                        ColumnDef::new(Videos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Videos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
    Title,
    Description,
    Length,
    Views,
    Rating,
    PublishDate,
    ThumbnailUrl,
    CreatedAt,
    UpdatedAt,
}
