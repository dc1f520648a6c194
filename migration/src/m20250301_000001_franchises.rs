use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum Franchises {
    Table,
    Id,
    Name,
    City,
    Address,
    Phone,
    Cep,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Franchises::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Franchises::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Franchises::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Franchises::City).string_len(100).not_null())
                    .col(ColumnDef::new(Franchises::Address).string_len(500).not_null())
                    .col(ColumnDef::new(Franchises::Phone).string_len(100).not_null())
                    .col(ColumnDef::new(Franchises::Cep).string_len(8))
                    .col(
                        ColumnDef::new(Franchises::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Franchises::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_franchises_city")
                    .table(Franchises::Table)
                    .col(Franchises::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_franchises_created_at")
                    .table(Franchises::Table)
                    .col(Franchises::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Franchises::Table).to_owned())
            .await
    }
}
