use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(HasrRows::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(HasrRows::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(HasrRows::Start).date_time().not_null())
            .col(ColumnDef::new(HasrRows::Date).date().not_null())
            .col(ColumnDef::new(HasrRows::Description).text().not_null())
            .col(
                ColumnDef::new(HasrRows::ActivityType)
                    .string_len(64)
                    .not_null(),
            )
            .col(
                ColumnDef::new(HasrRows::AggregateVariable)
                    .string_len(64)
                    .not_null(),
            )
            .col(ColumnDef::new(HasrRows::SessionStratum).string_len(8).null());

        // Undefined values are stored as NULL.
        for column in [
            HasrRows::BaselineRank,
            HasrRows::ClassRank,
            HasrRows::Hasr,
            HasrRows::RecentComposite,
            HasrRows::BaselineComposite,
            HasrRows::RecentEasy,
            HasrRows::RecentEasyProp,
            HasrRows::RecentHard,
            HasrRows::RecentHardProp,
            HasrRows::RecentLong,
            HasrRows::RecentLongProp,
            HasrRows::BaselineEasy,
            HasrRows::BaselineEasyProp,
            HasrRows::BaselineHard,
            HasrRows::BaselineHardProp,
            HasrRows::BaselineLong,
            HasrRows::BaselineLongProp,
        ] {
            table.col(ColumnDef::new(column).double().null());
        }

        manager.create_table(table.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hasr_rows_date")
                    .table(HasrRows::Table)
                    .col(HasrRows::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HasrRows::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HasrRows {
    Table,
    Id,
    Start,
    Date,
    Description,
    ActivityType,
    AggregateVariable,
    SessionStratum,
    BaselineRank,
    ClassRank,
    Hasr,
    RecentComposite,
    BaselineComposite,
    RecentEasy,
    RecentEasyProp,
    RecentHard,
    RecentHardProp,
    RecentLong,
    RecentLongProp,
    BaselineEasy,
    BaselineEasyProp,
    BaselineHard,
    BaselineHardProp,
    BaselineLong,
    BaselineLongProp,
}
