//! Create `store` table.
//!
//! Salon locations; includes soft-delete timestamp and free-form `custom_data`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(pk_auto(Store::Id))
                    .col(string_len(Store::Name, 50))
                    .col(string_len_null(Store::Address, 50))
                    .col(string_len_null(Store::BusinessHoursWeekdays, 32))
                    .col(string_len_null(Store::BusinessHoursWeekends, 32))
                    .col(integer(Store::ManPrice))
                    .col(integer(Store::WomanPrice))
                    .col(integer(Store::BoyPrice))
                    .col(integer(Store::GirlPrice))
                    .col(small_integer(Store::NextQueueId).default(1))
                    .col(small_integer(Store::SeatCount))
                    .col(string_len(Store::StoreType, 32))
                    .col(string_len_null(Store::StoreTypeText, 200))
                    .col(decimal_len(Store::Area, 5, 2))
                    .col(date_null(Store::OpenedDate))
                    .col(string_len_null(Store::PersonInCharge1, 50))
                    .col(string_len_null(Store::PersonInCharge2, 50))
                    .col(string_len_null(Store::Notes, 200))
                    .col(uuid_null(Store::ImageUuid))
                    .col(json_binary(Store::CustomData))
                    .col(timestamp_with_time_zone(Store::CreatedAt))
                    .col(timestamp_with_time_zone(Store::UpdatedAt))
                    // Explicitly define nullable deleted_at to avoid conflicting NULL/NOT NULL
                    .col(
                        ColumnDef::new(Store::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Store::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Store {
    Table,
    Id,
    Name,
    Address,
    BusinessHoursWeekdays,
    BusinessHoursWeekends,
    ManPrice,
    WomanPrice,
    BoyPrice,
    GirlPrice,
    NextQueueId,
    SeatCount,
    StoreType,
    StoreTypeText,
    Area,
    OpenedDate,
    #[sea_orm(iden = "person_in_charge1")]
    PersonInCharge1,
    #[sea_orm(iden = "person_in_charge2")]
    PersonInCharge2,
    Notes,
    ImageUuid,
    CustomData,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
