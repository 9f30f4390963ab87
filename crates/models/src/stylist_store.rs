use sea_orm::{entity::prelude::*, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{store, stylist};

/// Stylist-to-store assignment. These rows are hard-deleted, never trashed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stylist_store")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub stylist_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub store_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Stylist,
    Store,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Stylist => Entity::belongs_to(stylist::Entity)
                .from(Column::StylistId)
                .to(stylist::Column::Id)
                .into(),
            Relation::Store => Entity::belongs_to(store::Entity)
                .from(Column::StoreId)
                .to(store::Column::Id)
                .into(),
        }
    }
}

impl Related<stylist::Entity> for Entity {
    fn to() -> RelationDef { Relation::Stylist.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn assignment(stylist_id: i32, store_id: i32) -> ActiveModel {
    ActiveModel { stylist_id: Set(stylist_id), store_id: Set(store_id), created_at: Set(Utc::now().into()) }
}
