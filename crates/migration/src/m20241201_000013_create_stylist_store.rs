//! Create `stylist_store` join table.
//!
//! Rows are hard-deleted when their stylist is trashed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StylistStore::Table)
                    .if_not_exists()
                    .col(integer(StylistStore::StylistId))
                    .col(integer(StylistStore::StoreId))
                    .col(timestamp_with_time_zone(StylistStore::CreatedAt))
                    .primary_key(
                        Index::create()
                            .name("pk_stylist_store")
                            .col(StylistStore::StylistId)
                            .col(StylistStore::StoreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stylist_store_stylist")
                            .from(StylistStore::Table, StylistStore::StylistId)
                            .to(Stylist::Table, Stylist::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stylist_store_store")
                            .from(StylistStore::Table, StylistStore::StoreId)
                            .to(Store::Table, Store::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(StylistStore::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum StylistStore { Table, StylistId, StoreId, CreatedAt }

#[derive(DeriveIden)]
enum Stylist { Table, Id }

#[derive(DeriveIden)]
enum Store { Table, Id }
