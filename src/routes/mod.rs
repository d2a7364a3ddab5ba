use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::Catalog;
use crate::middleware::request_id::{make_span, request_id_middleware};
use crate::services::recommender::RecommendationEngine;

pub mod films;
pub mod people;
pub mod recommendations;

/// Shared, read-only application state.
///
/// The catalog snapshot and the engine are both fully built before the
/// listener binds; handlers only ever read them, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub engine: Arc<RecommendationEngine>,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/films/releases/months/:month", get(films::releases_by_month))
        .route("/films/releases/weekdays/:weekday", get(films::releases_by_weekday))
        .route("/films/:title/score", get(films::score))
        .route("/films/:title/votes", get(films::votes))
        .route("/people/actors/:name", get(people::actor_stats))
        .route("/people/directors/:name", get(people::director_stats))
        .route("/recommendations/:title", get(recommendations::recommend))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
