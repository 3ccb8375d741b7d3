//! Store handle and connection lifecycle
//!
//! The store owns only connection settings. Each operation opens a fresh
//! connection, runs its queries, and closes the connection on every path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use super::queries::{self, PrecipitationRow, StationRow, TemperatureRow, TemperatureSummary};
use crate::dates::ObservationDate;

/// How long a connection waits on a locked database file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("database file not found: {}", .0.display())]
    Missing(PathBuf),
}

/// Read-only handle on the climate SQLite file
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Store {
    /// Create a store for the database at `path`.
    ///
    /// Nothing is opened here; connections are made per operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(BUSY_TIMEOUT);

        Self { path, options }
    }

    /// Create a store, failing if the database file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DbError> {
        let store = Self::new(path);
        if !store.path.is_file() {
            return Err(DbError::Missing(store.path));
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    async fn connect(&self) -> Result<SqliteConnection, DbError> {
        let conn = self.options.connect().await?;
        tracing::debug!(path = %self.path.display(), "opened store connection");
        Ok(conn)
    }

    /// Close `conn`, then hand back the query result.
    ///
    /// A close failure only surfaces when the query itself succeeded.
    async fn release<T>(
        &self,
        conn: SqliteConnection,
        result: Result<T, sqlx::Error>,
    ) -> Result<T, DbError> {
        let closed = conn.close().await;
        tracing::debug!(path = %self.path.display(), "closed store connection");

        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(DbError::Sqlx(e)),
            (Err(e), Ok(())) => Err(DbError::Sqlx(e)),
            (Err(e), Err(close_err)) => {
                tracing::warn!("failed to close store connection: {}", close_err);
                Err(DbError::Sqlx(e))
            }
        }
    }

    /// Open and close a connection without querying.
    pub async fn ping(&self) -> Result<(), DbError> {
        let conn = self.connect().await?;
        self.release(conn, Ok(())).await
    }

    /// Every `(date, prcp)` pair in row order.
    pub async fn precipitation(&self) -> Result<Vec<PrecipitationRow>, DbError> {
        let mut conn = self.connect().await?;
        let result = queries::precipitation(&mut conn).await;
        self.release(conn, result).await
    }

    /// Every station in row order.
    pub async fn stations(&self) -> Result<Vec<StationRow>, DbError> {
        let mut conn = self.connect().await?;
        let result = queries::stations(&mut conn).await;
        self.release(conn, result).await
    }

    /// Temperature observations of the most active station since `since`.
    ///
    /// Both lookups share one connection. An empty store yields no rows.
    pub async fn most_active_temperatures(
        &self,
        since: ObservationDate,
    ) -> Result<Vec<TemperatureRow>, DbError> {
        let mut conn = self.connect().await?;

        let result = match queries::most_active_station(&mut conn).await {
            Ok(Some(active)) => {
                tracing::debug!(
                    station = %active.station,
                    observations = active.observations,
                    "most active station"
                );
                queries::temperatures_since(&mut conn, &active.station, since).await
            }
            Ok(None) => Ok(Vec::new()),
            Err(e) => Err(e),
        };

        self.release(conn, result).await
    }

    /// Min/avg/max temperature from `start` onwards, or within `start..=end`.
    pub async fn temperature_summary(
        &self,
        start: ObservationDate,
        end: Option<ObservationDate>,
    ) -> Result<TemperatureSummary, DbError> {
        let mut conn = self.connect().await?;
        let result = queries::temperature_summary(&mut conn, start, end).await;
        self.release(conn, result).await
    }
}
