use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::{error::AppResult, middleware::request_id::RequestId};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub recommendations: Vec<String>,
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(title): Path<String>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        title = %title,
        "Processing recommendation request"
    );

    let recommendations = state.engine.recommend(&title)?;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendations assembled"
    );

    Ok(Json(RecommendationResponse {
        title,
        recommendations,
    }))
}
