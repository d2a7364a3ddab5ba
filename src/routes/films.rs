use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{Month, Weekday},
    services::stats::{self, TitleScore, TitleVotes},
};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct MonthReleasesResponse {
    pub month: String,
    pub film_count: usize,
}

#[derive(Debug, Serialize)]
pub struct WeekdayReleasesResponse {
    pub weekday: String,
    pub film_count: usize,
}

/// Handler for release counts by month
pub async fn releases_by_month(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> AppResult<Json<MonthReleasesResponse>> {
    let month: Month = month
        .parse()
        .map_err(|e: crate::models::ParseCalendarError| AppError::InvalidInput(e.to_string()))?;

    let film_count = stats::releases_in_month(&state.catalog, month);
    Ok(Json(MonthReleasesResponse {
        month: month.to_string(),
        film_count,
    }))
}

/// Handler for release counts by weekday
pub async fn releases_by_weekday(
    State(state): State<AppState>,
    Path(weekday): Path<String>,
) -> AppResult<Json<WeekdayReleasesResponse>> {
    let weekday: Weekday = weekday
        .parse()
        .map_err(|e: crate::models::ParseCalendarError| AppError::InvalidInput(e.to_string()))?;

    let film_count = stats::releases_on_weekday(&state.catalog, weekday);
    Ok(Json(WeekdayReleasesResponse {
        weekday: weekday.to_string(),
        film_count,
    }))
}

/// Handler for a title's release year and popularity score
pub async fn score(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<TitleScore>> {
    let score = stats::score_for_title(&state.catalog, &title)?;
    Ok(Json(score))
}

/// Handler for a title's vote statistics
pub async fn votes(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<TitleVotes>> {
    let votes = stats::votes_for_title(&state.catalog, &title)?;
    Ok(Json(votes))
}
