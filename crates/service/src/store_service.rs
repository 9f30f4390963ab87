//! Store CRUD with derived stylist counts, soft delete and cursor paging.
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument};

use models::meta_column::MetaTable;
use models::store::{self, NewStore, StorePatch};

use crate::aggregates::{self, StylistCounts};
use crate::custom_fields::{sanitize, SeaOrmFieldRegistry};
use crate::errors::ServiceError;
use crate::pagination::{paginate, CursorPage, CursorParams};
use crate::soft_delete::SoftDeleteRepo;

type Stores = SoftDeleteRepo<store::Entity>;

/// A store with its derived stylist counts.
#[derive(Clone, Debug, Serialize)]
pub struct StoreDetail {
    #[serde(flatten)]
    pub store: store::Model,
    #[serde(flatten)]
    pub counts: StylistCounts,
}

/// Slim projection used by pickers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct StoreSummary {
    pub id: i32,
    pub name: String,
    pub seat_count: i16,
}

impl From<store::Model> for StoreSummary {
    fn from(m: store::Model) -> Self {
        Self { id: m.id, name: m.name, seat_count: m.seat_count }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum StoreView {
    Detail(StoreDetail),
    Summary(StoreSummary),
}

impl StoreView {
    pub fn id(&self) -> i32 {
        match self {
            StoreView::Detail(d) => d.store.id,
            StoreView::Summary(s) => s.id,
        }
    }
}

async fn detail<C: ConnectionTrait>(db: &C, store: store::Model) -> Result<StoreDetail, ServiceError> {
    let counts = StylistCounts::load(db, store.id).await?;
    Ok(StoreDetail { store, counts })
}

async fn view<C: ConnectionTrait>(db: &C, store: store::Model, detailed: bool) -> Result<StoreView, ServiceError> {
    if detailed {
        Ok(StoreView::Detail(detail(db, store).await?))
    } else {
        Ok(StoreView::Summary(store.into()))
    }
}

#[derive(Clone)]
pub struct StoreService {
    db: DatabaseConnection,
}

impl StoreService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    #[instrument(skip_all, fields(name = %input.name))]
    pub async fn create_store(&self, input: NewStore) -> Result<StoreDetail, ServiceError> {
        let mut input = input.validate()?;
        let txn = self.db.begin().await?;
        let custom = sanitize(&SeaOrmFieldRegistry::new(&txn), MetaTable::Store, input.custom_data.take()).await?;
        let created = input.into_active_model(custom).insert(&txn).await?;
        let out = detail(&txn, created).await?;
        txn.commit().await?;
        info!(id = out.store.id, "store created");
        Ok(out)
    }

    /// Every visible store in ascending id order.
    pub async fn list_stores(&self, detailed: bool) -> Result<Vec<StoreView>, ServiceError> {
        if !detailed {
            let rows = Stores::visible()
                .select_only()
                .columns([store::Column::Id, store::Column::Name, store::Column::SeatCount])
                .order_by_asc(store::Column::Id)
                .into_model::<StoreSummary>()
                .all(&self.db)
                .await?;
            return Ok(rows.into_iter().map(StoreView::Summary).collect());
        }
        let rows = Stores::visible().order_by_asc(store::Column::Id).all(&self.db).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(StoreView::Detail(detail(&self.db, row).await?));
        }
        Ok(out)
    }

    pub async fn get_store(&self, id: i32, detailed: bool) -> Result<Option<StoreView>, ServiceError> {
        match Stores::find_visible(&self.db, id).await? {
            Some(row) => Ok(Some(view(&self.db, row, detailed).await?)),
            None => Ok(None),
        }
    }

    pub async fn list_stores_paged(
        &self,
        params: CursorParams,
        detailed: bool,
    ) -> Result<CursorPage<StoreView>, ServiceError> {
        let rows = paginate::<store::Entity, _>(&self.db, params).await?;
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(view(&self.db, row, detailed).await?);
        }
        Ok(CursorPage::from_rows(views, StoreView::id))
    }

    /// Sanitize, update and recount inside one transaction.
    #[instrument(skip(self, patch))]
    pub async fn update_store(&self, id: i32, patch: StorePatch) -> Result<StoreDetail, ServiceError> {
        let mut patch = patch.validate()?;
        let txn = self.db.begin().await?;
        let current = Stores::get_visible(&txn, id).await?;
        let mut am: store::ActiveModel = current.into();
        if let Some(raw) = patch.custom_data.take() {
            let custom = sanitize(&SeaOrmFieldRegistry::new(&txn), MetaTable::Store, Some(raw)).await?;
            am.custom_data = Set(custom);
        }
        patch.apply(&mut am);
        let updated = am.update(&txn).await?;
        let out = detail(&txn, updated).await?;
        txn.commit().await?;
        info!(id, "store updated");
        Ok(out)
    }

    #[instrument(skip(self))]
    pub async fn trash_store(&self, id: i32) -> Result<store::Model, ServiceError> {
        let trashed = Stores::trash(&self.db, id).await?;
        info!(id, "store trashed");
        Ok(trashed)
    }

    #[instrument(skip(self))]
    pub async fn trash_stores(&self, ids: &[i32]) -> Result<u64, ServiceError> {
        let n = Stores::trash_many(&self.db, ids).await?;
        info!(count = n, "stores trashed");
        Ok(n)
    }

    #[instrument(skip(self))]
    pub async fn restore_stores(&self, ids: &[i32]) -> Result<u64, ServiceError> {
        let n = Stores::restore(&self.db, ids).await?;
        info!(count = n, "stores restored");
        Ok(n)
    }

    pub async fn get_next_queue_id(&self, store_id: i32) -> Result<Option<i16>, ServiceError> {
        let found = Stores::visible()
            .select_only()
            .column(store::Column::NextQueueId)
            .filter(store::Column::Id.eq(store_id))
            .into_tuple::<i16>()
            .one(&self.db)
            .await?;
        Ok(found)
    }

    pub async fn count_stylists(&self, store_id: i32) -> Result<u64, ServiceError> {
        Ok(aggregates::count_stylists(&self.db, store_id).await?)
    }

    pub async fn count_active_stylists(&self, store_id: i32) -> Result<u64, ServiceError> {
        Ok(aggregates::count_active_stylists(&self.db, store_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::meta_column::{self, DataType};
    use models::stylist::StylistStatus;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::test_support::{memory_db, new_store, seed_stylist};

    async fn service() -> anyhow::Result<StoreService> {
        Ok(StoreService::new(memory_db().await?))
    }

    fn detail_of(v: StoreView) -> StoreDetail {
        match v {
            StoreView::Detail(d) => d,
            StoreView::Summary(s) => panic!("expected detail, got summary for {}", s.id),
        }
    }

    #[tokio::test]
    async fn create_sanitizes_custom_data() -> anyhow::Result<()> {
        let svc = service().await?;
        meta_column::register(MetaTable::Store, "color", DataType::Select, &["red", "blue"]).insert(&svc.db).await?;

        let mut input = new_store("Alpha");
        input.custom_data = Some(json!({"color": "red", "size": "L"}));
        let created = svc.create_store(input).await?;
        assert_eq!(created.store.custom_data, json!({"color": "red"}));
        assert_eq!(created.store.next_queue_id, 1);
        assert_eq!(created.counts, StylistCounts::default());

        let mut bad = new_store("Bravo");
        bad.custom_data = Some(json!({"color": "green"}));
        let err = svc.create_store(bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOption { ref key, .. } if key == "color"));
        assert_eq!(svc.list_stores(false).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() -> anyhow::Result<()> {
        let svc = service().await?;
        let mut input = new_store("Alpha");
        input.business_hours_weekdays = Some("7:00 PM - 9:00 AM".into());
        let err = svc.create_store(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(ref e) if e.field() == "business_hours_weekdays"));
        Ok(())
    }

    #[tokio::test]
    async fn detailed_reads_carry_counts() -> anyhow::Result<()> {
        let svc = service().await?;
        let a = svc.create_store(new_store("Alpha")).await?.store;
        seed_stylist(&svc.db, a.id, "Mai", StylistStatus::Active).await?;
        seed_stylist(&svc.db, a.id, "Lan", StylistStatus::Inactive).await?;

        let d = detail_of(svc.get_store(a.id, true).await?.expect("store"));
        assert_eq!(d.counts.total_stylist_count, 2);
        assert_eq!(d.counts.total_active_stylist_count, 1);
        assert_eq!(d.store.area, Decimal::new(1205, 1));
        assert_eq!(svc.count_stylists(a.id).await?, 2);
        assert_eq!(svc.count_active_stylists(a.id).await?, 1);

        let body = serde_json::to_value(StoreView::Detail(d))?;
        assert_eq!(body["total_stylist_count"], json!(2));
        assert_eq!(body["name"], json!("Alpha"));
        Ok(())
    }

    #[tokio::test]
    async fn slim_listing_projects_three_fields() -> anyhow::Result<()> {
        let svc = service().await?;
        let a = svc.create_store(new_store("Alpha")).await?.store;
        let b = svc.create_store(new_store("Bravo")).await?.store;
        svc.trash_store(a.id).await?;

        let slim = svc.list_stores(false).await?;
        assert_eq!(slim.len(), 1);
        let body = serde_json::to_value(&slim[0])?;
        assert_eq!(body, json!({"id": b.id, "name": "Bravo", "seat_count": 6}));
        Ok(())
    }

    #[tokio::test]
    async fn trashed_store_disappears_and_restores() -> anyhow::Result<()> {
        let svc = service().await?;
        let a = svc.create_store(new_store("Alpha")).await?.store;

        svc.trash_store(a.id).await?;
        assert!(svc.get_store(a.id, true).await?.is_none());
        assert!(svc.list_stores(true).await?.is_empty());
        assert_eq!(svc.get_next_queue_id(a.id).await?, None);

        assert_eq!(svc.restore_stores(&[a.id]).await?, 1);
        assert_eq!(svc.restore_stores(&[a.id]).await?, 1);
        assert!(svc.get_store(a.id, false).await?.is_some());
        assert_eq!(svc.get_next_queue_id(a.id).await?, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn update_is_partial_and_recounts() -> anyhow::Result<()> {
        let svc = service().await?;
        let a = svc.create_store(new_store("Alpha")).await?.store;
        seed_stylist(&svc.db, a.id, "Mai", StylistStatus::Active).await?;

        let patch = StorePatch { seat_count: Some(9), next_queue_id: Some(42), ..Default::default() };
        let updated = svc.update_store(a.id, patch).await?;
        assert_eq!(updated.store.seat_count, 9);
        assert_eq!(updated.store.name, "Alpha");
        assert_eq!(updated.store.address, a.address);
        assert_eq!(updated.counts.total_active_stylist_count, 1);
        assert_eq!(svc.get_next_queue_id(a.id).await?, Some(42));
        Ok(())
    }

    #[tokio::test]
    async fn update_on_trashed_store_is_not_found() -> anyhow::Result<()> {
        let svc = service().await?;
        let a = svc.create_store(new_store("Alpha")).await?.store;
        svc.trash_store(a.id).await?;
        let err = svc.update_store(a.id, StorePatch { seat_count: Some(1), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "store", .. }));
        Ok(())
    }

    #[tokio::test]
    async fn failed_sanitize_leaves_row_unchanged() -> anyhow::Result<()> {
        let svc = service().await?;
        meta_column::register(MetaTable::Store, "color", DataType::Select, &["red"]).insert(&svc.db).await?;
        let a = svc.create_store(new_store("Alpha")).await?.store;

        let patch = StorePatch {
            name: Some("Renamed".into()),
            custom_data: Some(json!({"color": "blue"})),
            ..Default::default()
        };
        assert!(svc.update_store(a.id, patch).await.is_err());
        let d = detail_of(svc.get_store(a.id, true).await?.expect("store"));
        assert_eq!(d.store.name, "Alpha");
        assert_eq!(d.store.custom_data, json!({}));
        Ok(())
    }

    #[tokio::test]
    async fn bulk_trash_and_paged_listing() -> anyhow::Result<()> {
        let svc = service().await?;
        let mut ids = Vec::new();
        for name in ["Alpha", "Bravo", "Charlie", "Delta", "Echo"] {
            ids.push(svc.create_store(new_store(name)).await?.store.id);
        }
        assert_eq!(svc.trash_stores(&[ids[1], ids[3], 999]).await?, 2);

        let page = svc.list_stores_paged(CursorParams::new(Some(2), None), false).await?;
        assert_eq!(page.data.iter().map(StoreView::id).collect::<Vec<_>>(), vec![ids[0], ids[2]]);
        assert_eq!(page.prev_cursor, Some(ids[0]));
        assert_eq!(page.next_cursor, Some(ids[2]));

        let page = svc.list_stores_paged(CursorParams::new(Some(2), page.next_cursor), true).await?;
        assert_eq!(page.data.iter().map(StoreView::id).collect::<Vec<_>>(), vec![ids[4]]);
        assert!(matches!(page.data[0], StoreView::Detail(_)));

        let page = svc.list_stores_paged(CursorParams::new(Some(2), page.next_cursor), true).await?;
        assert!(page.data.is_empty());
        assert_eq!(page.next_cursor, None);
        assert_eq!(page.prev_cursor, None);
        Ok(())
    }
}
