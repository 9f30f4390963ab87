//! Stylist counts derived per store on every read. Nothing is cached.
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DbErr, PaginatorTrait, QueryFilter};
use serde::Serialize;

use models::stylist::{self, StylistStatus};
use models::SoftDelete;

use crate::soft_delete::SoftDeleteRepo;

/// Count visible `E` rows whose `parent_col` equals `parent_id`, optionally
/// narrowed by an extra predicate.
pub async fn count_dependents<E, C>(
    db: &C,
    parent_col: E::Column,
    parent_id: i32,
    predicate: Option<Condition>,
) -> Result<u64, DbErr>
where
    E: SoftDelete,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let mut query = SoftDeleteRepo::<E>::visible().filter(parent_col.eq(parent_id));
    if let Some(cond) = predicate {
        query = query.filter(cond);
    }
    query.count(db).await
}

pub async fn count_stylists<C: ConnectionTrait>(db: &C, store_id: i32) -> Result<u64, DbErr> {
    count_dependents::<stylist::Entity, _>(db, stylist::Column::RegisteredStoreId, store_id, None).await
}

pub async fn count_active_stylists<C: ConnectionTrait>(db: &C, store_id: i32) -> Result<u64, DbErr> {
    let active = Condition::all().add(stylist::Column::Status.eq(StylistStatus::Active));
    count_dependents::<stylist::Entity, _>(db, stylist::Column::RegisteredStoreId, store_id, Some(active)).await
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StylistCounts {
    pub total_stylist_count: u64,
    pub total_active_stylist_count: u64,
}

impl StylistCounts {
    pub async fn load<C: ConnectionTrait>(db: &C, store_id: i32) -> Result<Self, DbErr> {
        Ok(Self {
            total_stylist_count: count_stylists(db, store_id).await?,
            total_active_stylist_count: count_active_stylists(db, store_id).await?,
        })
    }
}
