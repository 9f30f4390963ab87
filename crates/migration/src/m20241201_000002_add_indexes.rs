use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Stylist: aggregate counts filter on registered_store_id
        manager
            .create_index(
                Index::create()
                    .name("idx_stylist_registered_store")
                    .table(Stylist::Table)
                    .col(Stylist::RegisteredStoreId)
                    .to_owned(),
            )
            .await?;

        // Soft-delete read filter
        manager
            .create_index(
                Index::create()
                    .name("idx_store_deleted_at")
                    .table(Store::Table)
                    .col(Store::DeletedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_stylist_deleted_at")
                    .table(Stylist::Table)
                    .col(Stylist::DeletedAt)
                    .to_owned(),
            )
            .await?;

        // MetaColumn: composite unique (table_name, field_key)
        manager
            .create_index(
                Index::create()
                    .name("uniq_meta_column_table_key")
                    .table(MetaColumn::Table)
                    .col(MetaColumn::TableName)
                    .col(MetaColumn::FieldKey)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_stylist_registered_store").table(Stylist::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_store_deleted_at").table(Store::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_stylist_deleted_at").table(Stylist::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_meta_column_table_key").table(MetaColumn::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Store { Table, DeletedAt }

#[derive(DeriveIden)]
enum Stylist { Table, RegisteredStoreId, DeletedAt }

#[derive(DeriveIden)]
enum MetaColumn { Table, TableName, FieldKey }
