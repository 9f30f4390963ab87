#![cfg(test)]
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection};

use models::store::{self, NewStore, StoreType};
use models::stylist::{self, NewStylist, StylistStatus};

/// Fresh migrated in-memory SQLite database. One pooled connection, so every
/// test sees the same schema and never touches the pool while a transaction is open.
pub async fn memory_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn new_store(name: &str) -> NewStore {
    NewStore {
        name: name.to_string(),
        address: Some("1 Test Street".into()),
        business_hours_weekdays: Some("9:00 AM - 7:00 PM".into()),
        business_hours_weekends: None,
        man_price: 100_000,
        woman_price: 150_000,
        boy_price: 80_000,
        girl_price: 90_000,
        next_queue_id: None,
        seat_count: 6,
        store_type: StoreType::StreetStore,
        store_type_text: None,
        area: Decimal::new(1205, 1),
        opened_date: None,
        person_in_charge1: None,
        person_in_charge2: None,
        notes: None,
        image_uuid: None,
        custom_data: None,
    }
}

pub fn new_stylist(store_id: i32, name: &str, status: StylistStatus) -> NewStylist {
    NewStylist {
        status,
        gender: None,
        name: name.to_string(),
        phone_number: "0901234567".into(),
        email: None,
        date_of_birth: None,
        date_hired: None,
        position: None,
        work_type: None,
        living_area: None,
        registered_store_id: store_id,
        notes: None,
        image_uuid: None,
        custom_data: None,
    }
}

/// Insert a store directly, bypassing the service layer.
pub async fn seed_store(db: &DatabaseConnection, name: &str) -> Result<store::Model, anyhow::Error> {
    let am = new_store(name).validate()?.into_active_model(serde_json::json!({}));
    Ok(am.insert(db).await?)
}

pub async fn seed_stylist(
    db: &DatabaseConnection,
    store_id: i32,
    name: &str,
    status: StylistStatus,
) -> Result<stylist::Model, anyhow::Error> {
    let am = new_stylist(store_id, name, status).validate()?.into_active_model(serde_json::json!({}));
    Ok(am.insert(db).await?)
}
