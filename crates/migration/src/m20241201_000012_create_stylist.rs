//! Create `stylist` table with FK to `store`.
//!
//! Stores are only ever soft-deleted, so the FK restricts hard deletes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stylist::Table)
                    .if_not_exists()
                    .col(pk_auto(Stylist::Id))
                    .col(string_len(Stylist::Status, 16))
                    .col(string_len_null(Stylist::Gender, 16))
                    .col(string_len(Stylist::Name, 50))
                    .col(string_len(Stylist::PhoneNumber, 10))
                    .col(string_len_null(Stylist::Email, 100))
                    .col(date_null(Stylist::DateOfBirth))
                    .col(date_null(Stylist::DateHired))
                    .col(string_len_null(Stylist::Position, 50))
                    .col(string_len_null(Stylist::WorkType, 16))
                    .col(string_len_null(Stylist::LivingArea, 200))
                    .col(integer(Stylist::RegisteredStoreId))
                    .col(string_len_null(Stylist::Notes, 200))
                    .col(uuid_null(Stylist::ImageUuid))
                    .col(json_binary(Stylist::CustomData))
                    .col(timestamp_with_time_zone(Stylist::CreatedAt))
                    .col(timestamp_with_time_zone(Stylist::UpdatedAt))
                    .col(
                        ColumnDef::new(Stylist::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stylist_registered_store")
                            .from(Stylist::Table, Stylist::RegisteredStoreId)
                            .to(Store::Table, Store::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Stylist::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Stylist {
    Table,
    Id,
    Status,
    Gender,
    Name,
    PhoneNumber,
    Email,
    DateOfBirth,
    DateHired,
    Position,
    WorkType,
    LivingArea,
    RegisteredStoreId,
    Notes,
    ImageUuid,
    CustomData,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Store { Table, Id }
