use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SessionEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SessionEntries::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SessionEntries::Value).string().not_null())
                    .col(
                        ColumnDef::new(SessionEntries::UpdatedAt)
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
            .drop_table(Table::drop().table(SessionEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SessionEntries {
    Table,
    Name,
    Value,
    UpdatedAt,
}
