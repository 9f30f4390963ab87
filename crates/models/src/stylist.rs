use sea_orm::{entity::prelude::*, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::soft_delete::SoftDelete;
use crate::validation::{check_len, check_opt_len, normalize_phone, EMAIL, FREE_STR, MIN_NAME, STD_STR};
use crate::{store, stylist_store};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum StylistStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Inactive")]
    Inactive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Gender {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
    #[sea_orm(string_value = "Other")]
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum WorkType {
    #[sea_orm(string_value = "FullTime")]
    FullTime,
    #[sea_orm(string_value = "PartTime")]
    PartTime,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stylist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub status: StylistStatus,
    pub gender: Option<Gender>,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub date_of_birth: Option<Date>,
    pub date_hired: Option<Date>,
    pub position: Option<String>,
    pub work_type: Option<WorkType>,
    pub living_area: Option<String>,
    pub registered_store_id: i32,
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
    RegisteredStore,
    StylistStore,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::RegisteredStore => Entity::belongs_to(store::Entity)
                .from(Column::RegisteredStoreId)
                .to(store::Column::Id)
                .into(),
            Relation::StylistStore => Entity::has_many(stylist_store::Entity).into(),
        }
    }
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef { Relation::RegisteredStore.def() }
}

impl Related<stylist_store::Entity> for Entity {
    fn to() -> RelationDef { Relation::StylistStore.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDelete for Entity {
    const LABEL: &'static str = "stylist";

    fn id_column() -> Column { Column::Id }

    fn deleted_at_column() -> Column { Column::DeletedAt }

    fn updated_at_column() -> Column { Column::UpdatedAt }

    fn id_of(model: &Model) -> i32 { model.id }
}

/// Input for creating a stylist.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewStylist {
    pub status: StylistStatus,
    #[serde(default)]
    pub gender: Option<Gender>,
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<Date>,
    #[serde(default)]
    pub date_hired: Option<Date>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub work_type: Option<WorkType>,
    #[serde(default)]
    pub living_area: Option<String>,
    pub registered_store_id: i32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image_uuid: Option<Uuid>,
    #[serde(default)]
    pub custom_data: Option<Json>,
}

impl NewStylist {
    pub fn validate(mut self) -> Result<Self, ModelError> {
        check_len("name", &mut self.name, MIN_NAME, STD_STR)?;
        normalize_phone(&mut self.phone_number)?;
        check_opt_len("email", &mut self.email, 0, EMAIL)?;
        check_opt_len("position", &mut self.position, 0, STD_STR)?;
        check_opt_len("living_area", &mut self.living_area, 0, FREE_STR)?;
        check_opt_len("notes", &mut self.notes, 0, FREE_STR)?;
        if self.registered_store_id <= 0 {
            return Err(ModelError::validation("registered_store_id", "must be a positive store id"));
        }
        Ok(self)
    }

    pub fn into_active_model(self, custom_data: Json) -> ActiveModel {
        let now: DateTimeWithTimeZone = Utc::now().into();
        ActiveModel {
            status: Set(self.status),
            gender: Set(self.gender),
            name: Set(self.name),
            phone_number: Set(self.phone_number),
            email: Set(self.email),
            date_of_birth: Set(self.date_of_birth),
            date_hired: Set(self.date_hired),
            position: Set(self.position),
            work_type: Set(self.work_type),
            living_area: Set(self.living_area),
            registered_store_id: Set(self.registered_store_id),
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

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StylistPatch {
    pub status: Option<StylistStatus>,
    pub gender: Option<Gender>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<Date>,
    pub date_hired: Option<Date>,
    pub position: Option<String>,
    pub work_type: Option<WorkType>,
    pub living_area: Option<String>,
    pub registered_store_id: Option<i32>,
    pub notes: Option<String>,
    pub image_uuid: Option<Uuid>,
    pub custom_data: Option<Json>,
}

impl StylistPatch {
    pub fn validate(mut self) -> Result<Self, ModelError> {
        if let Some(name) = self.name.as_mut() { check_len("name", name, MIN_NAME, STD_STR)?; }
        if let Some(phone) = self.phone_number.as_mut() { normalize_phone(phone)?; }
        check_opt_len("email", &mut self.email, 0, EMAIL)?;
        check_opt_len("position", &mut self.position, 0, STD_STR)?;
        check_opt_len("living_area", &mut self.living_area, 0, FREE_STR)?;
        check_opt_len("notes", &mut self.notes, 0, FREE_STR)?;
        if matches!(self.registered_store_id, Some(id) if id <= 0) {
            return Err(ModelError::validation("registered_store_id", "must be a positive store id"));
        }
        Ok(self)
    }

    /// Everything except `custom_data`, which is sanitized separately.
    pub fn apply(self, am: &mut ActiveModel) {
        if let Some(v) = self.status { am.status = Set(v); }
        if let Some(v) = self.gender { am.gender = Set(Some(v)); }
        if let Some(v) = self.name { am.name = Set(v); }
        if let Some(v) = self.phone_number { am.phone_number = Set(v); }
        if let Some(v) = self.email { am.email = Set(Some(v)); }
        if let Some(v) = self.date_of_birth { am.date_of_birth = Set(Some(v)); }
        if let Some(v) = self.date_hired { am.date_hired = Set(Some(v)); }
        if let Some(v) = self.position { am.position = Set(Some(v)); }
        if let Some(v) = self.work_type { am.work_type = Set(Some(v)); }
        if let Some(v) = self.living_area { am.living_area = Set(Some(v)); }
        if let Some(v) = self.registered_store_id { am.registered_store_id = Set(v); }
        if let Some(v) = self.notes { am.notes = Set(Some(v)); }
        if let Some(v) = self.image_uuid { am.image_uuid = Set(Some(v)); }
        am.updated_at = Set(Utc::now().into());
    }
}
