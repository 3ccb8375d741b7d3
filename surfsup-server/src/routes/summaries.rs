//! Temperature summary endpoints - min/avg/max over date ranges
//!
//! Both routes answer a one-element array, even when nothing matched.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::dates::ObservationDate;
use crate::error::ApiError;
use crate::models::{RangeSummary, StartSummary};
use crate::state::AppState;

/// GET /api/v1.0/{start} - aggregates for every date on or after start
async fn from_start(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<StartSummary>>, ApiError> {
    let start = ObservationDate::parse("start", &start)?;
    let summary = state.store().temperature_summary(start, None).await?;

    Ok(Json(vec![StartSummary::new(start, summary)]))
}

/// GET /api/v1.0/{start}/{end} - aggregates for start..=end
async fn between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<RangeSummary>>, ApiError> {
    let start = ObservationDate::parse("start", &start)?;
    let end = ObservationDate::parse("end", &end)?;
    let summary = state.store().temperature_summary(start, Some(end)).await?;

    Ok(Json(vec![RangeSummary::new(start, end, summary)]))
}

/// Summary routes
///
/// The fixed observation paths share this prefix; axum matches them first.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1.0/{start}", get(from_start))
        .route("/api/v1.0/{start}/{end}", get(between))
}
