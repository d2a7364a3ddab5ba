use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    services::stats::{self, ActorSummary, DirectorSummary},
};

use super::AppState;

/// Handler for actor career statistics
pub async fn actor_stats(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ActorSummary>> {
    let summary = stats::actor_summary(&state.catalog, &name)?;
    Ok(Json(summary))
}

/// Handler for director career statistics with a per-film breakdown
pub async fn director_stats(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DirectorSummary>> {
    let summary = stats::director_summary(&state.catalog, &name)?;
    Ok(Json(summary))
}
