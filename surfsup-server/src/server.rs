//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing and timeout middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use chrono::NaiveDate;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::dates::DEFAULT_ANCHOR_DATE;
use crate::db::Store;
use crate::error::ServerError;
use crate::routes;
use crate::state::AppState;

/// Origins accepted when CORS is not permissive
const LOCAL_ORIGINS: [&str; 2] = ["http://localhost", "http://127.0.0.1"];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// SQLite file holding the `measurement` and `station` tables
    pub db_path: PathBuf,

    /// Per-request timeout
    pub timeout: Duration,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    /// Last date of the dataset, anchors the tobs window
    pub anchor_date: NaiveDate,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            db_path: PathBuf::from("Resources/hawaii.sqlite"),
            timeout: Duration::from_secs(30),
            cors_permissive: false,
            anchor_date: DEFAULT_ANCHOR_DATE,
        }
    }
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
                is_local_origin(origin)
            }))
            .allow_methods([Method::GET])
            .allow_headers(Any)
    };

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.timeout))
        .layer(cors);

    Router::new()
        .merge(routes::home::router())
        .merge(routes::health::router())
        .merge(routes::observations::router())
        .merge(routes::summaries::router())
        .layer(middleware)
        .with_state(state)
}

fn is_local_origin(origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    LOCAL_ORIGINS.iter().any(|local| {
        origin
            .strip_prefix(local)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'))
    })
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// Fails before binding if the database file is missing.
///
/// # Example
///
/// ```ignore
/// let config = SurfsupConfig::load(None)?.with_env_overrides().into_server_config()?;
/// run_server(config).await?;
/// ```
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let store = Store::open(&config.db_path)?;
    tracing::info!(
        db = %store.path().display(),
        anchor_date = %config.anchor_date,
        "climate store ready"
    );

    let state = AppState::new(store, config.anchor_date);
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::Fixture;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_for(path: impl Into<PathBuf>) -> Router {
        let config = ServerConfig::default();
        let state = AppState::new(Store::new(path), config.anchor_date);
        build_router(state, &config)
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.anchor_date, DEFAULT_ANCHOR_DATE);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn local_origins_only() {
        assert!(is_local_origin(&HeaderValue::from_static("http://localhost")));
        assert!(is_local_origin(&HeaderValue::from_static("http://localhost:3000")));
        assert!(is_local_origin(&HeaderValue::from_static("http://127.0.0.1:5000")));
        assert!(!is_local_origin(&HeaderValue::from_static("http://localhost.evil.com")));
        assert!(!is_local_origin(&HeaderValue::from_static("https://example.com")));
    }

    #[tokio::test]
    async fn root_lists_routes_as_text() {
        let fixture = Fixture::hawaii_sample().await;
        let app = app_for(fixture.path());

        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("/api/v1.0/precipitation"));
    }

    #[tokio::test]
    async fn precipitation_is_a_date_map() {
        let fixture = Fixture::hawaii_sample().await;
        let app = app_for(fixture.path());

        let response = get(&app, "/api/v1.0/precipitation").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let map = body.as_object().unwrap();
        assert_eq!(map.len(), 6);
        assert_eq!(map["2017-08-23"], json!(0.45));
        assert_eq!(map["2017-01-01"], Value::Null);
    }

    #[tokio::test]
    async fn fixed_routes_win_over_start_capture() {
        let fixture = Fixture::hawaii_sample().await;
        let app = app_for(fixture.path());

        let response = get(&app, "/api/v1.0/stations").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(
            body[0],
            json!({ "Station": "USC00519397", "Name": "WAIKIKI 717.2, HI US" })
        );
    }

    #[tokio::test]
    async fn tobs_records_shape() {
        let fixture = Fixture::hawaii_sample().await;
        let app = app_for(fixture.path());

        let body = json_body(get(&app, "/api/v1.0/tobs").await).await;
        assert_eq!(
            body,
            json!([
                { "Station_ID": "USC00519281", "Temperature": 77.0, "Date": "2016-08-23" },
                { "Station_ID": "USC00519281", "Temperature": 72.0, "Date": "2017-01-01" },
                { "Station_ID": "USC00519281", "Temperature": 79.0, "Date": "2017-08-18" }
            ])
        );
    }

    #[tokio::test]
    async fn start_summary_example() {
        let fixture = Fixture::with_measurements(&[
            ("A", "2017-01-01", None, Some(10.0)),
            ("A", "2017-01-02", None, Some(20.0)),
        ])
        .await;
        let app = app_for(fixture.path());

        let body = json_body(get(&app, "/api/v1.0/2017-01-01").await).await;
        assert_eq!(
            body,
            json!([{
                "StartDate": "2017-01-01",
                "Temp_Min": 10.0,
                "Temp_Avg": 15.0,
                "Temp_Max": 20.0
            }])
        );

        let body = json_body(get(&app, "/api/v1.0/2017-01-01/2017-01-01").await).await;
        assert_eq!(
            body,
            json!([{
                "Start_Date": "2017-01-01",
                "End_Date": "2017-01-01",
                "Temp_Min": 10.0,
                "Temp_Avg": 10.0,
                "Temp_Max": 10.0
            }])
        );
    }

    #[tokio::test]
    async fn malformed_dates_are_400() {
        let fixture = Fixture::hawaii_sample().await;
        let app = app_for(fixture.path());

        for uri in [
            "/api/v1.0/2017-13-40",
            "/api/v1.0/yesterday",
            "/api/v1.0/2017-01-01/2017-02-30",
            "/api/v1.0/+10000-01-01",
            "/api/v1.0/2017-01-01/+10000-01-01",
        ] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(json_body(response).await["error"], "malformed_date");
        }
    }

    #[tokio::test]
    async fn repeated_requests_are_identical() {
        let fixture = Fixture::hawaii_sample().await;
        let app = app_for(fixture.path());

        for uri in ["/api/v1.0/precipitation", "/api/v1.0/tobs", "/api/v1.0/2016-08-23"] {
            let first = json_body(get(&app, uri).await).await;
            let second = json_body(get(&app, uri).await).await;
            assert_eq!(first, second, "{}", uri);
        }
    }

    #[tokio::test]
    async fn missing_store_is_500_and_degraded() {
        let app = app_for("/no/such/hawaii.sqlite");

        let response = get(&app, "/api/v1.0/stations").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "internal_error");

        let response = get(&app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "degraded");
    }

    #[tokio::test]
    async fn run_server_requires_database() {
        let config = ServerConfig {
            db_path: PathBuf::from("/no/such/hawaii.sqlite"),
            ..ServerConfig::default()
        };

        assert!(matches!(
            run_server(config).await,
            Err(ServerError::Database(_))
        ));
    }
}
