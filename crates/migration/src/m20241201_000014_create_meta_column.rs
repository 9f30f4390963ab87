//! Create `meta_column` table: registry of custom-data fields per entity table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MetaColumn::Table)
                    .if_not_exists()
                    .col(pk_auto(MetaColumn::Id))
                    .col(string_len(MetaColumn::TableName, 32))
                    .col(string_len(MetaColumn::FieldKey, 64))
                    .col(string_len(MetaColumn::DataType, 16))
                    .col(json_binary(MetaColumn::SelectOptions))
                    .col(timestamp_with_time_zone(MetaColumn::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MetaColumn::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MetaColumn { Table, Id, TableName, FieldKey, DataType, SelectOptions, CreatedAt }
