pub mod stores;
pub mod stylists;

use axum::{
    routing::{get, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::{StoreService, StylistService};

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerState {
    pub stores: StoreService,
    pub stylists: StylistService,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { stores: StoreService::new(db.clone()), stylists: StylistService::new(db) }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// `?ids=1,2,3`
#[derive(Debug, Deserialize)]
pub struct IdsQuery {
    pub ids: String,
}

impl IdsQuery {
    pub fn parse(&self) -> Result<Vec<i32>, JsonApiError> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<i32>().map_err(|_| JsonApiError::bad_request(format!("invalid id `{s}` in ids"))))
            .collect()
    }
}

/// Build the application router with tracing and CORS layers.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let store_routes = Router::new()
        .route("/stores", get(stores::list).post(stores::create).delete(stores::trash_many))
        .route("/stores/restore", put(stores::restore))
        .route("/stores/:id", get(stores::get_one).put(stores::update).delete(stores::trash))
        .route("/stores/:id/next_queue_id", get(stores::next_queue_id))
        .route("/stores/:id/stylist-count", get(stores::stylist_count))
        .route("/stores/:id/active-stylist-count", get(stores::active_stylist_count));

    let stylist_routes = Router::new()
        .route("/stylists", get(stylists::list).post(stylists::create).delete(stylists::trash_many))
        .route("/stylists/restore", put(stylists::restore))
        .route("/stylists/search/:name_like", get(stylists::search))
        .route("/stylists/:id", get(stylists::get_one).put(stylists::update).delete(stylists::trash));

    Router::new()
        .route("/health", get(health))
        .merge(store_routes)
        .merge(stylist_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_query_parses_comma_list() {
        let q = IdsQuery { ids: "1, 2,,3".into() };
        assert_eq!(q.parse().unwrap(), vec![1, 2, 3]);
        let bad = IdsQuery { ids: "1,x".into() };
        assert_eq!(bad.parse().unwrap_err().status, axum::http::StatusCode::BAD_REQUEST);
    }
}
