//! Root route - static listing of available routes

use axum::{routing::get, Router};

use crate::state::AppState;

/// Route listing served at `/` and printed by `surfsup routes`
pub const ROUTE_LISTING: &str = "\
Welcome to the Climate API!
Available Routes:
/api/v1.0/precipitation
/api/v1.0/stations
/api/v1.0/tobs
/api/v1.0/<start>
/api/v1.0/<start>/<end>
To search temperatures from a start date use this format: YYYY-MM-DD
To search temperatures between two dates use this format: YYYY-MM-DD/YYYY-MM-DD
Start date only example: /api/v1.0/2016-01-01
Start date - End date example: /api/v1.0/2016-01-01/2017-01-01
";

/// GET /
async fn home() -> &'static str {
    ROUTE_LISTING
}

/// Home routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}
