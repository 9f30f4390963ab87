use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument};

use models::meta_column::MetaTable;
use models::stylist::{self, NewStylist, StylistPatch};
use models::{store, stylist_store};

use crate::custom_fields::{sanitize, SeaOrmFieldRegistry};
use crate::errors::ServiceError;
use crate::soft_delete::SoftDeleteRepo;

type Stylists = SoftDeleteRepo<stylist::Entity>;

/// A stylist, optionally carrying the name of its registered store.
#[derive(Clone, Debug, Serialize)]
pub struct StylistView {
    #[serde(flatten)]
    pub stylist: stylist::Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}

impl StylistView {
    fn bare(stylist: stylist::Model) -> Self {
        Self { stylist, store_name: None }
    }

    fn joined((stylist, store): (stylist::Model, Option<store::Model>)) -> Self {
        Self { stylist, store_name: store.map(|s| s.name) }
    }
}

async fn store_name<C: ConnectionTrait>(db: &C, store_id: i32) -> Result<Option<String>, ServiceError> {
    let name = store::Entity::find_by_id(store_id)
        .select_only()
        .column(store::Column::Name)
        .into_tuple::<String>()
        .one(db)
        .await?;
    Ok(name)
}

async fn view<C: ConnectionTrait>(
    db: &C,
    stylist: stylist::Model,
    include_store_name: bool,
) -> Result<StylistView, ServiceError> {
    if !include_store_name {
        return Ok(StylistView::bare(stylist));
    }
    let store_name = store_name(db, stylist.registered_store_id).await?;
    Ok(StylistView { stylist, store_name })
}

/// `%needle%` with LIKE wildcards in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[derive(Clone)]
pub struct StylistService {
    db: DatabaseConnection,
}

impl StylistService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Insert the stylist and its registered-store assignment in one transaction.
    #[instrument(skip_all, fields(store_id = input.registered_store_id))]
    pub async fn create_stylist(&self, input: NewStylist, include_store_name: bool) -> Result<StylistView, ServiceError> {
        let mut input = input.validate()?;
        let txn = self.db.begin().await?;
        let custom = sanitize(&SeaOrmFieldRegistry::new(&txn), MetaTable::Stylist, input.custom_data.take()).await?;
        let created = input.into_active_model(custom).insert(&txn).await?;
        stylist_store::assignment(created.id, created.registered_store_id).insert(&txn).await?;
        let out = view(&txn, created, include_store_name).await?;
        txn.commit().await?;
        info!(id = out.stylist.id, "stylist created");
        Ok(out)
    }

    pub async fn list_stylists(&self, include_store_name: bool) -> Result<Vec<StylistView>, ServiceError> {
        let query = Stylists::visible().order_by_asc(stylist::Column::Id);
        if include_store_name {
            let rows = query.find_also_related(store::Entity).all(&self.db).await?;
            return Ok(rows.into_iter().map(StylistView::joined).collect());
        }
        Ok(query.all(&self.db).await?.into_iter().map(StylistView::bare).collect())
    }

    pub async fn get_stylist(&self, id: i32, include_store_name: bool) -> Result<Option<StylistView>, ServiceError> {
        match Stylists::find_visible(&self.db, id).await? {
            Some(found) => Ok(Some(view(&self.db, found, include_store_name).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, patch))]
    pub async fn update_stylist(
        &self,
        id: i32,
        patch: StylistPatch,
        include_store_name: bool,
    ) -> Result<StylistView, ServiceError> {
        let mut patch = patch.validate()?;
        let txn = self.db.begin().await?;
        let current = Stylists::get_visible(&txn, id).await?;
        let mut am: stylist::ActiveModel = current.into();
        if let Some(raw) = patch.custom_data.take() {
            let custom = sanitize(&SeaOrmFieldRegistry::new(&txn), MetaTable::Stylist, Some(raw)).await?;
            am.custom_data = Set(custom);
        }
        patch.apply(&mut am);
        let updated = am.update(&txn).await?;
        let out = view(&txn, updated, include_store_name).await?;
        txn.commit().await?;
        info!(id, "stylist updated");
        Ok(out)
    }

    /// Drop the stylist's store assignments, then soft-delete it.
    #[instrument(skip(self))]
    pub async fn trash_stylist(&self, id: i32) -> Result<stylist::Model, ServiceError> {
        let txn = self.db.begin().await?;
        stylist_store::Entity::delete_many()
            .filter(stylist_store::Column::StylistId.eq(id))
            .exec(&txn)
            .await?;
        let trashed = Stylists::trash(&txn, id).await?;
        txn.commit().await?;
        info!(id, "stylist trashed");
        Ok(trashed)
    }

    #[instrument(skip(self))]
    pub async fn trash_stylists(&self, ids: &[i32]) -> Result<u64, ServiceError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let txn = self.db.begin().await?;
        let unlinked = stylist_store::Entity::delete_many()
            .filter(stylist_store::Column::StylistId.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;
        let n = Stylists::trash_many(&txn, ids).await?;
        txn.commit().await?;
        info!(count = n, assignments = unlinked.rows_affected, "stylists trashed");
        Ok(n)
    }

    #[instrument(skip(self))]
    pub async fn restore_stylists(&self, ids: &[i32]) -> Result<u64, ServiceError> {
        let n = Stylists::restore(&self.db, ids).await?;
        info!(count = n, "stylists restored");
        Ok(n)
    }

    /// Case-insensitive substring match on name, visible rows only.
    pub async fn search_stylists_by_name(&self, name_like: &str) -> Result<Vec<stylist::Model>, ServiceError> {
        let pattern = LikeExpr::new(contains_pattern(name_like.trim())).escape('\\');
        let rows = Stylists::visible()
            .filter(Expr::expr(Func::lower(Expr::col(stylist::Column::Name))).like(pattern))
            .order_by_asc(stylist::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}
