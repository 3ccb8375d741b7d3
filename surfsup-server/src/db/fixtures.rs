//! Temporary SQLite files shaped like `hawaii.sqlite`

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tempfile::TempDir;

const SCHEMA: &str = r#"
CREATE TABLE measurement (
    id INTEGER NOT NULL,
    station TEXT,
    date TEXT,
    prcp FLOAT,
    tobs FLOAT,
    PRIMARY KEY (id)
);
CREATE TABLE station (
    id INTEGER NOT NULL,
    station TEXT,
    name TEXT,
    latitude FLOAT,
    longitude FLOAT,
    elevation FLOAT,
    PRIMARY KEY (id)
);
"#;

/// `(station, name)` in row order
pub const SAMPLE_STATIONS: &[(&str, &str)] = &[
    ("USC00519397", "WAIKIKI 717.2, HI US"),
    ("USC00519281", "WAIHEE 837.5, HI US"),
    ("USC00513117", "KANEOHE 838.1, HI US"),
];

/// `(station, date, prcp, tobs)` in row order
pub type MeasurementSeed<'a> = (&'a str, &'a str, Option<f64>, Option<f64>);

/// USC00519281 is the most active station; 2016-08-22, 2016-08-23 and
/// 2017-08-23 are reported by more than one station.
pub const SAMPLE_MEASUREMENTS: &[MeasurementSeed<'static>] = &[
    ("USC00519397", "2016-08-22", Some(0.08), Some(77.0)),
    ("USC00519397", "2017-08-23", Some(0.0), Some(81.0)),
    ("USC00519281", "2010-01-01", Some(0.15), Some(70.0)),
    ("USC00519281", "2016-08-22", Some(1.79), Some(76.0)),
    ("USC00519281", "2016-08-23", Some(1.79), Some(77.0)),
    ("USC00519281", "2017-01-01", None, Some(72.0)),
    ("USC00519281", "2017-08-18", Some(0.06), Some(79.0)),
    ("USC00513117", "2016-08-23", Some(0.05), Some(76.0)),
    ("USC00513117", "2017-08-23", Some(0.45), Some(82.0)),
];

/// A seeded database file removed on drop
pub struct Fixture {
    _dir: TempDir,
    path: PathBuf,
    measurements: usize,
}

impl Fixture {
    pub async fn hawaii_sample() -> Self {
        Self::seed(SAMPLE_STATIONS, SAMPLE_MEASUREMENTS).await
    }

    pub async fn with_measurements(measurements: &[MeasurementSeed<'_>]) -> Self {
        Self::seed(SAMPLE_STATIONS, measurements).await
    }

    pub async fn seed(stations: &[(&str, &str)], measurements: &[MeasurementSeed<'_>]) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hawaii.sqlite");

        let mut conn = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .connect()
            .await
            .expect("create fixture database");

        sqlx::raw_sql(SCHEMA)
            .execute(&mut conn)
            .await
            .expect("create schema");

        for (station, name) in stations {
            sqlx::query("INSERT INTO station (station, name) VALUES (?, ?)")
                .bind(*station)
                .bind(*name)
                .execute(&mut conn)
                .await
                .expect("insert station");
        }

        for (station, date, prcp, tobs) in measurements {
            sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
                .bind(*station)
                .bind(*date)
                .bind(*prcp)
                .bind(*tobs)
                .execute(&mut conn)
                .await
                .expect("insert measurement");
        }

        conn.close().await.expect("close fixture connection");

        Self {
            _dir: dir,
            path,
            measurements: measurements.len(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn measurement_count(&self) -> usize {
        self.measurements
    }

    pub async fn connect(&self) -> SqliteConnection {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .connect()
            .await
            .expect("connect to fixture")
    }
}
