use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use models::store::{self, NewStore, StorePatch};
use service::{CursorParams, StoreDetail, StoreView};

use crate::errors::JsonApiError;
use crate::routes::{IdsQuery, ServerState};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Return every store instead of a page. Defaults to true.
    pub all: Option<bool>,
    #[serde(rename = "perPage")]
    pub per_page: Option<i64>,
    pub cursor: Option<i32>,
    #[serde(rename = "idAndNameAndSeatCountOnly")]
    pub slim: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(rename = "idAndNameAndSeatCountOnly")]
    pub slim: Option<bool>,
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewStore>,
) -> Result<Json<StoreDetail>, JsonApiError> {
    Ok(Json(state.stores.create_store(input).await?))
}

pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Response, JsonApiError> {
    let detailed = !q.slim.unwrap_or(false);
    if q.all.unwrap_or(true) {
        let stores = state.stores.list_stores(detailed).await?;
        info!(count = stores.len(), "list stores");
        return Ok(Json(stores).into_response());
    }
    let page = state.stores.list_stores_paged(CursorParams::new(q.per_page, q.cursor), detailed).await?;
    Ok(Json(page).into_response())
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(q): Query<DetailQuery>,
) -> Result<Json<StoreView>, JsonApiError> {
    state
        .stores
        .get_store(id, !q.slim.unwrap_or(false))
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("store {id} not found")))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(patch): Json<StorePatch>,
) -> Result<Json<StoreDetail>, JsonApiError> {
    Ok(Json(state.stores.update_store(id, patch).await?))
}

pub async fn trash(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<store::Model>, JsonApiError> {
    Ok(Json(state.stores.trash_store(id).await?))
}

pub async fn trash_many(
    State(state): State<ServerState>,
    Query(q): Query<IdsQuery>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    let ids = q.parse()?;
    let count = state.stores.trash_stores(&ids).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn restore(
    State(state): State<ServerState>,
    Query(q): Query<IdsQuery>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    let ids = q.parse()?;
    let count = state.stores.restore_stores(&ids).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn next_queue_id(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Option<i16>>, JsonApiError> {
    Ok(Json(state.stores.get_next_queue_id(id).await?))
}

pub async fn stylist_count(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<u64>, JsonApiError> {
    Ok(Json(state.stores.count_stylists(id).await?))
}

pub async fn active_stylist_count(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<u64>, JsonApiError> {
    Ok(Json(state.stores.count_active_stylists(id).await?))
}
