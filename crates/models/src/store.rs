use sea_orm::{entity::prelude::*, Set};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::soft_delete::SoftDelete;
use crate::stylist;
use crate::validation::{
    check_area, check_len, check_opt_len, check_range, check_price, check_time_range, FREE_STR, MAX_SEAT_COUNT,
    MIN_STORE_TEXT, SMALL_INT, STD_STR,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreType {
    #[sea_orm(string_value = "STREET_STORE")]
    StreetStore,
    #[sea_orm(string_value = "SHOPPING_CENTER")]
    ShoppingCenter,
    #[sea_orm(string_value = "STATION")]
    Station,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub business_hours_weekdays: Option<String>,
    pub business_hours_weekends: Option<String>,
    pub man_price: i32,
    pub woman_price: i32,
    pub boy_price: i32,
    pub girl_price: i32,
    pub next_queue_id: i16,
    pub seat_count: i16,
    pub store_type: StoreType,
    pub store_type_text: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub area: Decimal,
    pub opened_date: Option<Date>,
    pub person_in_charge1: Option<String>,
    pub person_in_charge2: Option<String>,
    pub notes: Option<String>,
    pub image_uuid: Option<Uuid>,
    #[sea_orm(column_type = "JsonBinary")]
    pub custom_data: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Stylist,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Stylist => Entity::has_many(stylist::Entity).into() }
    }
}

impl Related<stylist::Entity> for Entity {
    fn to() -> RelationDef { Relation::Stylist.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDelete for Entity {
    const LABEL: &'static str = "store";

    fn id_column() -> Column { Column::Id }

    fn deleted_at_column() -> Column { Column::DeletedAt }

    fn updated_at_column() -> Column { Column::UpdatedAt }

    fn id_of(model: &Model) -> i32 { model.id }
}

/// Input for creating a store. Call [`NewStore::validate`] before persisting.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewStore {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub business_hours_weekdays: Option<String>,
    #[serde(default)]
    pub business_hours_weekends: Option<String>,
    pub man_price: i32,
    pub woman_price: i32,
    pub boy_price: i32,
    pub girl_price: i32,
    #[serde(default)]
    pub next_queue_id: Option<i16>,
    pub seat_count: i16,
    pub store_type: StoreType,
    #[serde(default)]
    pub store_type_text: Option<String>,
    pub area: Decimal,
    #[serde(default)]
    pub opened_date: Option<Date>,
    #[serde(default)]
    pub person_in_charge1: Option<String>,
    #[serde(default)]
    pub person_in_charge2: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image_uuid: Option<Uuid>,
    #[serde(default)]
    pub custom_data: Option<Json>,
}

impl NewStore {
    /// Trim text fields and check every bound; returns the normalized input.
    pub fn validate(mut self) -> Result<Self, ModelError> {
        check_len("name", &mut self.name, MIN_STORE_TEXT, STD_STR)?;
        check_opt_len("address", &mut self.address, MIN_STORE_TEXT, STD_STR)?;
        check_time_range("business_hours_weekdays", &mut self.business_hours_weekdays)?;
        check_time_range("business_hours_weekends", &mut self.business_hours_weekends)?;
        check_price("man_price", self.man_price)?;
        check_price("woman_price", self.woman_price)?;
        check_price("boy_price", self.boy_price)?;
        check_price("girl_price", self.girl_price)?;
        if let Some(q) = self.next_queue_id { check_range("next_queue_id", q, 0, SMALL_INT)?; }
        check_range("seat_count", self.seat_count, 0, MAX_SEAT_COUNT)?;
        check_opt_len("store_type_text", &mut self.store_type_text, 0, FREE_STR)?;
        check_area(self.area)?;
        check_opt_len("person_in_charge1", &mut self.person_in_charge1, 0, STD_STR)?;
        check_opt_len("person_in_charge2", &mut self.person_in_charge2, 0, STD_STR)?;
        check_opt_len("notes", &mut self.notes, 0, FREE_STR)?;
        Ok(self)
    }

    /// Build the insert model; `custom_data` must already be sanitized.
    pub fn into_active_model(self, custom_data: Json) -> ActiveModel {
        let now: DateTimeWithTimeZone = Utc::now().into();
        ActiveModel {
            name: Set(self.name),
            address: Set(self.address),
            business_hours_weekdays: Set(self.business_hours_weekdays),
            business_hours_weekends: Set(self.business_hours_weekends),
            man_price: Set(self.man_price),
            woman_price: Set(self.woman_price),
            boy_price: Set(self.boy_price),
            girl_price: Set(self.girl_price),
            next_queue_id: Set(self.next_queue_id.unwrap_or(1)),
            seat_count: Set(self.seat_count),
            store_type: Set(self.store_type),
            store_type_text: Set(self.store_type_text),
            area: Set(self.area),
            opened_date: Set(self.opened_date),
            person_in_charge1: Set(self.person_in_charge1),
            person_in_charge2: Set(self.person_in_charge2),
            notes: Set(self.notes),
            image_uuid: Set(self.image_uuid),
            custom_data: Set(custom_data),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
    }
}

/// Partial update; `None` leaves the stored value unchanged.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StorePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub business_hours_weekdays: Option<String>,
    pub business_hours_weekends: Option<String>,
    pub man_price: Option<i32>,
    pub woman_price: Option<i32>,
    pub boy_price: Option<i32>,
    pub girl_price: Option<i32>,
    pub next_queue_id: Option<i16>,
    pub seat_count: Option<i16>,
    pub store_type: Option<StoreType>,
    pub store_type_text: Option<String>,
    pub area: Option<Decimal>,
    pub opened_date: Option<Date>,
    pub person_in_charge1: Option<String>,
    pub person_in_charge2: Option<String>,
    pub notes: Option<String>,
    pub image_uuid: Option<Uuid>,
    pub custom_data: Option<Json>,
}

impl StorePatch {
    pub fn validate(mut self) -> Result<Self, ModelError> {
        if let Some(name) = self.name.as_mut() { check_len("name", name, MIN_STORE_TEXT, STD_STR)?; }
        check_opt_len("address", &mut self.address, MIN_STORE_TEXT, STD_STR)?;
        check_time_range("business_hours_weekdays", &mut self.business_hours_weekdays)?;
        check_time_range("business_hours_weekends", &mut self.business_hours_weekends)?;
        for (field, price) in [
            ("man_price", self.man_price),
            ("woman_price", self.woman_price),
            ("boy_price", self.boy_price),
            ("girl_price", self.girl_price),
        ] {
            if let Some(p) = price { check_price(field, p)?; }
        }
        if let Some(q) = self.next_queue_id { check_range("next_queue_id", q, 0, SMALL_INT)?; }
        if let Some(s) = self.seat_count { check_range("seat_count", s, 0, MAX_SEAT_COUNT)?; }
        check_opt_len("store_type_text", &mut self.store_type_text, 0, FREE_STR)?;
        if let Some(a) = self.area { check_area(a)?; }
        check_opt_len("person_in_charge1", &mut self.person_in_charge1, 0, STD_STR)?;
        check_opt_len("person_in_charge2", &mut self.person_in_charge2, 0, STD_STR)?;
        check_opt_len("notes", &mut self.notes, 0, FREE_STR)?;
        Ok(self)
    }

    /// Copy every provided field onto `am` except `custom_data`, which the
    /// caller sets after sanitizing.
    pub fn apply(self, am: &mut ActiveModel) {
        if let Some(v) = self.name { am.name = Set(v); }
        if let Some(v) = self.address { am.address = Set(Some(v)); }
        if let Some(v) = self.business_hours_weekdays { am.business_hours_weekdays = Set(Some(v)); }
        if let Some(v) = self.business_hours_weekends { am.business_hours_weekends = Set(Some(v)); }
        if let Some(v) = self.man_price { am.man_price = Set(v); }
        if let Some(v) = self.woman_price { am.woman_price = Set(v); }
        if let Some(v) = self.boy_price { am.boy_price = Set(v); }
        if let Some(v) = self.girl_price { am.girl_price = Set(v); }
        if let Some(v) = self.next_queue_id { am.next_queue_id = Set(v); }
        if let Some(v) = self.seat_count { am.seat_count = Set(v); }
        if let Some(v) = self.store_type { am.store_type = Set(v); }
        if let Some(v) = self.store_type_text { am.store_type_text = Set(Some(v)); }
        if let Some(v) = self.area { am.area = Set(v); }
        if let Some(v) = self.opened_date { am.opened_date = Set(Some(v)); }
        if let Some(v) = self.person_in_charge1 { am.person_in_charge1 = Set(Some(v)); }
        if let Some(v) = self.person_in_charge2 { am.person_in_charge2 = Set(Some(v)); }
        if let Some(v) = self.notes { am.notes = Set(Some(v)); }
        if let Some(v) = self.image_uuid { am.image_uuid = Set(Some(v)); }
        am.updated_at = Set(Utc::now().into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewStore {
        serde_json::from_value(serde_json::json!({
            "name": "  Downtown  ",
            "address": "12 Main Street",
            "business_hours_weekdays": "9:00 AM - 7:00 PM",
            "business_hours_weekends": "10:00 AM - 6:00 PM",
            "man_price": 100000,
            "woman_price": 150000,
            "boy_price": 80000,
            "girl_price": 90000,
            "seat_count": 8,
            "store_type": "SHOPPING_CENTER",
            "area": 120.5
        }))
        .unwrap()
    }

    #[test]
    fn new_store_deserializes_and_validates() {
        let s = sample().validate().unwrap();
        assert_eq!(s.name, "Downtown");
        assert_eq!(s.store_type, StoreType::ShoppingCenter);
        assert_eq!(s.business_hours_weekdays.as_deref(), Some("9:00 AM - 7:00 PM"));
        assert_eq!(s.area, Decimal::new(1205, 1));
    }

    #[test]
    fn new_store_rejects_reversed_hours() {
        let mut s = sample();
        s.business_hours_weekends = Some("7:00 PM - 9:00 AM".into());
        let err = s.validate().unwrap_err();
        assert_eq!(err.field(), "business_hours_weekends");
    }

    #[test]
    fn new_store_rejects_out_of_range_numbers() {
        let mut s = sample();
        s.seat_count = 1000;
        assert_eq!(s.validate().unwrap_err().field(), "seat_count");

        let mut s = sample();
        s.girl_price = crate::validation::MAX_PRICE + 1;
        assert_eq!(s.validate().unwrap_err().field(), "girl_price");

        let mut s = sample();
        s.area = Decimal::new(100_000, 2);
        assert_eq!(s.validate().unwrap_err().field(), "area");
    }

    #[test]
    fn active_model_defaults_queue_and_markers() {
        let am = sample().validate().unwrap().into_active_model(serde_json::json!({}));
        assert_eq!(am.next_queue_id, Set(1));
        assert_eq!(am.deleted_at, Set(None));
        assert!(am.id.is_not_set());
    }

    #[test]
    fn patch_only_touches_provided_fields() {
        let patch = StorePatch { seat_count: Some(4), name: Some(" Uptown ".into()), ..Default::default() }
            .validate()
            .unwrap();
        let mut am = <ActiveModel as Default>::default();
        patch.apply(&mut am);
        assert_eq!(am.name, Set("Uptown".to_string()));
        assert_eq!(am.seat_count, Set(4));
        assert!(am.address.is_not_set());
        assert!(am.custom_data.is_not_set());
    }
}
