use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sessions::Start)
                            .date_time()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Sessions::DurationHours).double().not_null())
                    .col(ColumnDef::new(Sessions::Load).double().not_null())
                    .col(ColumnDef::new(Sessions::Description).text().not_null())
                    .col(
                        ColumnDef::new(Sessions::ActivityType)
                            .string_len(64)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sessions {
    Table,
    Id,
    Start,
    DurationHours,
    Load,
    Description,
    ActivityType,
}
