//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::models::{DatabaseHealth, HealthResponse};
use crate::state::AppState;

/// GET /health - always 200; `status` says whether the store answers
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.store();
    let reachable = match store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check could not reach store: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        database: DatabaseHealth {
            reachable,
            path: store.path().display().to_string(),
            size_bytes: store.size_bytes(),
        },
    })
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
