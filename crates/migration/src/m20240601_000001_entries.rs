//! Ledger schema: a single append-and-delete `entries` table.
//!
//! `id` uses SQLite `AUTOINCREMENT`, so ids of deleted rows are never handed
//! out again unless the sequence is explicitly reset.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::RecordedAt).date_time().not_null())
                    .col(ColumnDef::new(Entries::EntryType).string().not_null())
                    .col(ColumnDef::new(Entries::Category).string().not_null())
                    .col(ColumnDef::new(Entries::AmountMinor).big_integer().not_null())
                    .col(
                        ColumnDef::new(Entries::Note)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-entries-type-recorded_at")
                    .table(Entries::Table)
                    .col(Entries::EntryType)
                    .col(Entries::RecordedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Entries {
    Table,
    Id,
    RecordedAt,
    EntryType,
    Category,
    AmountMinor,
    Note,
}
