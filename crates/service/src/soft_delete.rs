//! Visible-only repository over any [`SoftDelete`] entity.
//!
//! Every standard read goes through [`SoftDeleteRepo::visible`]; seeing trashed
//! rows requires the explicit [`SoftDeleteRepo::with_trashed`] bypass.
use std::marker::PhantomData;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Select};
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::debug;

use models::SoftDelete;

use crate::errors::ServiceError;

pub struct SoftDeleteRepo<E>(PhantomData<E>);

impl<E: SoftDelete> SoftDeleteRepo<E> {
    /// Rows whose `deleted_at` is null.
    pub fn visible() -> Select<E> {
        E::find().filter(E::deleted_at_column().is_null())
    }

    pub fn with_trashed() -> Select<E> {
        E::find()
    }

    pub async fn find_visible<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<E::Model>, DbErr> {
        Self::visible().filter(E::id_column().eq(id)).one(db).await
    }

    pub async fn get_visible<C: ConnectionTrait>(db: &C, id: i32) -> Result<E::Model, ServiceError> {
        Self::find_visible(db, id).await?.ok_or_else(|| ServiceError::not_found(E::LABEL, id))
    }

    /// Mark one visible row as deleted and return it.
    pub async fn trash<C: ConnectionTrait>(db: &C, id: i32) -> Result<E::Model, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let res = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(Some(now)))
            .col_expr(E::updated_at_column(), Expr::value(now))
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_null())
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found(E::LABEL, id));
        }
        Self::with_trashed()
            .filter(E::id_column().eq(id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found(E::LABEL, id))
    }

    /// Bulk trash. Missing or already-deleted ids are skipped; returns rows trashed.
    pub async fn trash_many<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }
        let now: DateTimeWithTimeZone = Utc::now().into();
        let res = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(Some(now)))
            .col_expr(E::updated_at_column(), Expr::value(now))
            .filter(E::id_column().is_in(ids.iter().copied()))
            .filter(E::deleted_at_column().is_null())
            .exec(db)
            .await?;
        if (res.rows_affected as usize) < ids.len() {
            debug!(entity = E::LABEL, requested = ids.len(), trashed = res.rows_affected, "some ids skipped");
        }
        Ok(res.rows_affected)
    }

    /// Clear the marker on every matching id regardless of state; returns matched rows.
    pub async fn restore<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }
        let now: DateTimeWithTimeZone = Utc::now().into();
        let res = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(Option::<DateTimeWithTimeZone>::None))
            .col_expr(E::updated_at_column(), Expr::value(now))
            .filter(E::id_column().is_in(ids.iter().copied()))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
