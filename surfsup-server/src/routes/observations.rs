//! Observation endpoints - precipitation, stations, tobs

use axum::{extract::State, routing::get, Json, Router};

use crate::dates::lookback_start;
use crate::error::ApiError;
use crate::models::{precipitation_by_date, PrecipitationByDate, StationEntry, TemperatureObservation};
use crate::state::AppState;

/// GET /api/v1.0/precipitation - date to precipitation, last row wins
async fn precipitation(State(state): State<AppState>) -> Result<Json<PrecipitationByDate>, ApiError> {
    let rows = state.store().precipitation().await?;
    Ok(Json(precipitation_by_date(rows)))
}

/// GET /api/v1.0/stations - every station in row order
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<StationEntry>>, ApiError> {
    let rows = state.store().stations().await?;
    Ok(Json(rows.into_iter().map(StationEntry::from).collect()))
}

/// GET /api/v1.0/tobs - last year of observations at the most active station
async fn tobs(State(state): State<AppState>) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let since = lookback_start(state.anchor_date());
    let rows = state.store().most_active_temperatures(since).await?;
    Ok(Json(rows.into_iter().map(TemperatureObservation::from).collect()))
}

/// Observation routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
}
