//! Cursor pagination over visible rows in stable id order.
//!
//! `take` is signed: its magnitude is the page size and a negative value walks
//! backward from the cursor. A cursor is a row id; `0` means no cursor. When the
//! cursor row is missing or trashed, paging restarts from the nearest visible id
//! in the requested direction and includes it.
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use models::SoftDelete;

use crate::soft_delete::SoftDeleteRepo;

pub const DEFAULT_PAGE_SIZE: u64 = 5;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct CursorParams {
    pub take: Option<i64>,
    pub cursor: Option<i32>,
}

impl CursorParams {
    pub fn new(take: Option<i64>, cursor: Option<i32>) -> Self { Self { take, cursor } }

    pub fn direction(&self) -> Direction {
        match self.take {
            Some(t) if t < 0 => Direction::Backward,
            _ => Direction::Forward,
        }
    }

    /// Magnitude of `take`, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> u64 {
        match self.take {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(t) => t.unsigned_abs().min(MAX_PAGE_SIZE),
        }
    }

    /// The cursor, with `0` folded into "absent".
    pub fn cursor(&self) -> Option<i32> {
        self.cursor.filter(|c| *c != 0)
    }
}

/// One page plus page-relative bookmarks: `next_cursor` is the last id,
/// `prev_cursor` the first. Both are null for an empty page.
#[derive(Clone, Debug, Serialize)]
pub struct CursorPage<T> {
    pub data: Vec<T>,
    pub next_cursor: Option<i32>,
    pub prev_cursor: Option<i32>,
}

impl<T> CursorPage<T> {
    pub fn empty() -> Self {
        Self { data: Vec::new(), next_cursor: None, prev_cursor: None }
    }

    pub fn from_rows(data: Vec<T>, id_of: impl Fn(&T) -> i32) -> Self {
        let prev_cursor = data.first().map(&id_of);
        let next_cursor = data.last().map(&id_of);
        Self { data, next_cursor, prev_cursor }
    }

    /// Convert each row while keeping the bookmarks.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> CursorPage<U> {
        CursorPage {
            data: self.data.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            prev_cursor: self.prev_cursor,
        }
    }
}

/// Fetch one page of visible `E` rows, always returned in ascending id order.
pub async fn paginate<E, C>(db: &C, params: CursorParams) -> Result<Vec<E::Model>, DbErr>
where
    E: SoftDelete,
    C: ConnectionTrait,
{
    let size = params.page_size();
    let direction = params.direction();
    let id = E::id_column();

    let Some(cursor) = params.cursor() else {
        return SoftDeleteRepo::<E>::visible().order_by_asc(id).limit(size).all(db).await;
    };

    // (anchor id, whether the anchor row belongs on the page)
    let (anchor, inclusive) = match SoftDeleteRepo::<E>::find_visible(db, cursor).await? {
        Some(_) => (cursor, false),
        None => {
            let nearest = match direction {
                Direction::Forward => SoftDeleteRepo::<E>::visible().filter(id.gt(cursor)).order_by_asc(id),
                Direction::Backward => SoftDeleteRepo::<E>::visible().filter(id.lt(cursor)).order_by_desc(id),
            }
            .one(db)
            .await?;
            match nearest {
                Some(row) => (E::id_of(&row), true),
                None => return Ok(Vec::new()),
            }
        }
    };

    let query = SoftDeleteRepo::<E>::visible();
    let query = match (direction, inclusive) {
        (Direction::Forward, false) => query.filter(id.gt(anchor)).order_by_asc(id),
        (Direction::Forward, true) => query.filter(id.gte(anchor)).order_by_asc(id),
        (Direction::Backward, false) => query.filter(id.lt(anchor)).order_by_desc(id),
        (Direction::Backward, true) => query.filter(id.lte(anchor)).order_by_desc(id),
    };
    let mut rows = query.limit(size).all(db).await?;
    if direction == Direction::Backward {
        rows.reverse();
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_db, seed_store};
    use models::store;

    fn ids(rows: &[store::Model]) -> Vec<i32> {
        rows.iter().map(|r| r.id).collect()
    }

    async fn seed(db: &sea_orm::DatabaseConnection, n: usize) -> anyhow::Result<Vec<i32>> {
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(seed_store(db, &format!("Store {i:02}")).await?.id);
        }
        Ok(out)
    }

    #[test]
    fn params_defaults() {
        let p = CursorParams::default();
        assert_eq!(p.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(p.direction(), Direction::Forward);
        assert_eq!(p.cursor(), None);

        let p = CursorParams::new(Some(0), Some(0));
        assert_eq!(p.page_size(), 5);
        assert_eq!(p.cursor(), None);

        let p = CursorParams::new(Some(-3), Some(9));
        assert_eq!(p.page_size(), 3);
        assert_eq!(p.direction(), Direction::Backward);
        assert_eq!(p.cursor(), Some(9));
    }

    #[test]
    fn extreme_take_is_clamped() {
        let p = CursorParams::new(Some(i64::MIN), Some(2));
        assert_eq!(p.page_size(), MAX_PAGE_SIZE);
        assert_eq!(p.direction(), Direction::Backward);
        let p = CursorParams::new(Some(i64::MAX), None);
        assert_eq!(p.page_size(), MAX_PAGE_SIZE);
        assert_eq!(p.direction(), Direction::Forward);
    }

    #[tokio::test]
    async fn extreme_take_returns_a_page() -> anyhow::Result<()> {
        let db = memory_db().await?;
        let all = seed(&db, 4).await?;
        let rows = paginate::<store::Entity, _>(&db, CursorParams::new(Some(i64::MIN), Some(all[2]))).await?;
        assert_eq!(ids(&rows), vec![all[0], all[1]]);
        let rows = paginate::<store::Entity, _>(&db, CursorParams::new(Some(i64::MAX), Some(all[0]))).await?;
        assert_eq!(ids(&rows), vec![all[1], all[2], all[3]]);
        Ok(())
    }

    #[test]
    fn page_bookmarks_follow_first_and_last() {
        let page = CursorPage::from_rows(vec![3, 5, 8], |v| *v);
        assert_eq!(page.prev_cursor, Some(3));
        assert_eq!(page.next_cursor, Some(8));
        let mapped = page.map(|v| v * 10);
        assert_eq!(mapped.data, vec![30, 50, 80]);
        assert_eq!(mapped.next_cursor, Some(8));

        let empty = CursorPage::<i32>::from_rows(vec![], |v| *v);
        assert_eq!(empty.next_cursor, None);
        assert_eq!(empty.prev_cursor, None);
    }

    #[tokio::test]
    async fn forward_walk_visits_every_visible_row_once() -> anyhow::Result<()> {
        let db = memory_db().await?;
        let all = seed(&db, 12).await?;
        SoftDeleteRepo::<store::Entity>::trash_many(&db, &[all[3], all[7]]).await?;

        let mut seen = Vec::new();
        let mut cursor = None;
        loop {
            let rows = paginate::<store::Entity, _>(&db, CursorParams::new(Some(4), cursor)).await?;
            if rows.is_empty() {
                break;
            }
            let page = CursorPage::from_rows(rows, |r| r.id);
            cursor = page.next_cursor;
            seen.extend(ids(&page.data));
        }
        let expected: Vec<i32> = all.iter().copied().filter(|id| *id != all[3] && *id != all[7]).collect();
        assert_eq!(seen, expected);
        Ok(())
    }

    #[tokio::test]
    async fn cursor_on_deleted_row_resumes_at_nearest_greater() -> anyhow::Result<()> {
        let db = memory_db().await?;
        let all = seed(&db, 5).await?; // ids 1..=5
        SoftDeleteRepo::<store::Entity>::trash(&db, all[3]).await?; // id 4

        let rows = paginate::<store::Entity, _>(&db, CursorParams::new(Some(2), Some(all[3]))).await?;
        assert_eq!(ids(&rows), vec![all[4]]);

        let rows = paginate::<store::Entity, _>(&db, CursorParams::new(Some(-2), Some(all[3]))).await?;
        assert_eq!(ids(&rows), vec![all[1], all[2]]);
        Ok(())
    }

    #[tokio::test]
    async fn visible_cursor_is_excluded() -> anyhow::Result<()> {
        let db = memory_db().await?;
        let all = seed(&db, 6).await?;

        let rows = paginate::<store::Entity, _>(&db, CursorParams::new(Some(2), Some(all[1]))).await?;
        assert_eq!(ids(&rows), vec![all[2], all[3]]);

        let rows = paginate::<store::Entity, _>(&db, CursorParams::new(Some(-3), Some(all[4]))).await?;
        assert_eq!(ids(&rows), vec![all[1], all[2], all[3]]);
        Ok(())
    }

    #[tokio::test]
    async fn cursor_past_the_end_yields_empty_page() -> anyhow::Result<()> {
        let db = memory_db().await?;
        let all = seed(&db, 3).await?;

        let rows = paginate::<store::Entity, _>(&db, CursorParams::new(Some(2), Some(all[2] + 100))).await?;
        assert!(rows.is_empty());
        let rows = paginate::<store::Entity, _>(&db, CursorParams::new(Some(-2), Some(all[0]))).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_take_defaults_to_five() -> anyhow::Result<()> {
        let db = memory_db().await?;
        let all = seed(&db, 7).await?;
        let rows = paginate::<store::Entity, _>(&db, CursorParams::default()).await?;
        assert_eq!(ids(&rows), all[..5].to_vec());
        Ok(())
    }
}
