//! Declarative queries over the `measurement` and `station` tables
//!
//! Each function runs against a borrowed connection; opening and closing
//! is the store's job.

use sqlx::sqlite::SqliteConnection;
use sqlx::FromRow;

use crate::dates::ObservationDate;

/// One `(date, prcp)` pair from `measurement`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

/// One row of `station`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StationRow {
    pub station: String,
    pub name: String,
}

/// Measurement count for a station
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// One temperature observation at a station
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TemperatureRow {
    pub station: String,
    pub date: String,
    pub tobs: Option<f64>,
}

/// Aggregates over a filtered set of observations; all null when empty
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct TemperatureSummary {
    pub temp_min: Option<f64>,
    pub temp_avg: Option<f64>,
    pub temp_max: Option<f64>,
}

pub async fn precipitation(conn: &mut SqliteConnection) -> Result<Vec<PrecipitationRow>, sqlx::Error> {
    sqlx::query_as::<_, PrecipitationRow>("SELECT date, prcp FROM measurement")
        .fetch_all(conn)
        .await
}

pub async fn stations(conn: &mut SqliteConnection) -> Result<Vec<StationRow>, sqlx::Error> {
    sqlx::query_as::<_, StationRow>("SELECT station, name FROM station")
        .fetch_all(conn)
        .await
}

/// Station with the most measurements; equal counts go to the lowest id.
pub async fn most_active_station(
    conn: &mut SqliteConnection,
) -> Result<Option<StationActivity>, sqlx::Error> {
    sqlx::query_as::<_, StationActivity>(
        r#"
        SELECT station, COUNT(date) AS observations
        FROM measurement
        GROUP BY station
        ORDER BY observations DESC, station ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(conn)
    .await
}

/// Observations at `station` on or after `since`, no upper bound.
pub async fn temperatures_since(
    conn: &mut SqliteConnection,
    station: &str,
    since: ObservationDate,
) -> Result<Vec<TemperatureRow>, sqlx::Error> {
    sqlx::query_as::<_, TemperatureRow>(
        r#"
        SELECT station, date, tobs
        FROM measurement
        WHERE station = ? AND date >= ?
        "#,
    )
    .bind(station)
    .bind(since.to_column())
    .fetch_all(conn)
    .await
}

/// MIN/AVG/MAX of `tobs` for `date >= start`, and `date <= end` when given.
pub async fn temperature_summary(
    conn: &mut SqliteConnection,
    start: ObservationDate,
    end: Option<ObservationDate>,
) -> Result<TemperatureSummary, sqlx::Error> {
    match end {
        Some(end) => {
            sqlx::query_as::<_, TemperatureSummary>(
                r#"
                SELECT MIN(tobs) AS temp_min, AVG(tobs) AS temp_avg, MAX(tobs) AS temp_max
                FROM measurement
                WHERE date >= ? AND date <= ?
                "#,
            )
            .bind(start.to_column())
            .bind(end.to_column())
            .fetch_one(conn)
            .await
        }
        None => {
            sqlx::query_as::<_, TemperatureSummary>(
                r#"
                SELECT MIN(tobs) AS temp_min, AVG(tobs) AS temp_avg, MAX(tobs) AS temp_max
                FROM measurement
                WHERE date >= ?
                "#,
            )
            .bind(start.to_column())
            .fetch_one(conn)
            .await
        }
    }
}
