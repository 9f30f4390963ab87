use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use models::stylist::{self, NewStylist, StylistPatch};
use service::StylistView;

use crate::errors::JsonApiError;
use crate::routes::{IdsQuery, ServerState};

#[derive(Debug, Deserialize)]
pub struct StoreNameQuery {
    #[serde(rename = "includeStoreName")]
    pub include_store_name: Option<bool>,
}

impl StoreNameQuery {
    fn include(&self) -> bool {
        self.include_store_name.unwrap_or(true)
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Query(q): Query<StoreNameQuery>,
    Json(input): Json<NewStylist>,
) -> Result<Json<StylistView>, JsonApiError> {
    Ok(Json(state.stylists.create_stylist(input, q.include()).await?))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<StoreNameQuery>,
) -> Result<Json<Vec<StylistView>>, JsonApiError> {
    Ok(Json(state.stylists.list_stylists(q.include()).await?))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(q): Query<StoreNameQuery>,
) -> Result<Json<StylistView>, JsonApiError> {
    state
        .stylists
        .get_stylist(id, q.include())
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("stylist {id} not found")))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(q): Query<StoreNameQuery>,
    Json(patch): Json<StylistPatch>,
) -> Result<Json<StylistView>, JsonApiError> {
    Ok(Json(state.stylists.update_stylist(id, patch, q.include()).await?))
}

pub async fn trash(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<stylist::Model>, JsonApiError> {
    Ok(Json(state.stylists.trash_stylist(id).await?))
}

pub async fn trash_many(
    State(state): State<ServerState>,
    Query(q): Query<IdsQuery>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    let ids = q.parse()?;
    let count = state.stylists.trash_stylists(&ids).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn restore(
    State(state): State<ServerState>,
    Query(q): Query<IdsQuery>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    let ids = q.parse()?;
    let count = state.stylists.restore_stylists(&ids).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn search(
    State(state): State<ServerState>,
    Path(name_like): Path<String>,
) -> Result<Json<Vec<stylist::Model>>, JsonApiError> {
    Ok(Json(state.stylists.search_stylists_by_name(&name_like).await?))
}
