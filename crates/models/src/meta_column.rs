//! Registry of custom-data fields permitted per entity table.
use sea_orm::{entity::prelude::*, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum MetaTable {
    #[sea_orm(string_value = "store")]
    Store,
    #[sea_orm(string_value = "stylist")]
    Stylist,
}

impl MetaTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaTable::Store => "store",
            MetaTable::Stylist => "stylist",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "number")]
    Number,
    #[sea_orm(string_value = "date")]
    Date,
    #[sea_orm(string_value = "select")]
    Select,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meta_column")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub table_name: MetaTable,
    pub field_key: String,
    pub data_type: DataType,
    /// JSON array of permitted values; only meaningful for `select`.
    #[sea_orm(column_type = "JsonBinary")]
    pub select_options: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// String members of `select_options`; non-string entries are ignored.
    pub fn options(&self) -> Vec<String> {
        self.select_options
            .as_array()
            .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default()
    }
}

pub fn register(table: MetaTable, key: &str, data_type: DataType, options: &[&str]) -> ActiveModel {
    ActiveModel {
        table_name: Set(table),
        field_key: Set(key.to_string()),
        data_type: Set(data_type),
        select_options: Set(Json::from(options.iter().map(|o| Json::from(*o)).collect::<Vec<_>>())),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
}
