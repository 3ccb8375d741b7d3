//! Response models for the climate API
//!
//! Field names follow the published JSON contract, hence the renames.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dates::ObservationDate;
use crate::db::{PrecipitationRow, StationRow, TemperatureRow, TemperatureSummary};

// ============================================================================
// Precipitation
// ============================================================================

/// Date to precipitation, one entry per distinct date
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Collapse rows into a date mapping; a later row wins over an earlier one.
pub fn precipitation_by_date(rows: Vec<PrecipitationRow>) -> PrecipitationByDate {
    let mut by_date = BTreeMap::new();
    for row in rows {
        by_date.insert(row.date, row.prcp);
    }
    by_date
}

// ============================================================================
// Stations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationEntry {
    #[serde(rename = "Station")]
    pub station: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<StationRow> for StationEntry {
    fn from(row: StationRow) -> Self {
        Self {
            station: row.station,
            name: row.name,
        }
    }
}

// ============================================================================
// Temperature observations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureObservation {
    #[serde(rename = "Station_ID")]
    pub station_id: String,
    #[serde(rename = "Temperature")]
    pub temperature: Option<f64>,
    #[serde(rename = "Date")]
    pub date: String,
}

impl From<TemperatureRow> for TemperatureObservation {
    fn from(row: TemperatureRow) -> Self {
        Self {
            station_id: row.station,
            temperature: row.tobs,
            date: row.date,
        }
    }
}

// ============================================================================
// Temperature summaries
// ============================================================================

/// Aggregates from a start date onwards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartSummary {
    #[serde(rename = "StartDate")]
    pub start_date: ObservationDate,
    #[serde(rename = "Temp_Min")]
    pub temp_min: Option<f64>,
    #[serde(rename = "Temp_Avg")]
    pub temp_avg: Option<f64>,
    #[serde(rename = "Temp_Max")]
    pub temp_max: Option<f64>,
}

impl StartSummary {
    pub fn new(start_date: ObservationDate, summary: TemperatureSummary) -> Self {
        Self {
            start_date,
            temp_min: summary.temp_min,
            temp_avg: summary.temp_avg,
            temp_max: summary.temp_max,
        }
    }
}

/// Aggregates over an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    #[serde(rename = "Start_Date")]
    pub start_date: ObservationDate,
    #[serde(rename = "End_Date")]
    pub end_date: ObservationDate,
    #[serde(rename = "Temp_Min")]
    pub temp_min: Option<f64>,
    #[serde(rename = "Temp_Avg")]
    pub temp_avg: Option<f64>,
    #[serde(rename = "Temp_Max")]
    pub temp_max: Option<f64>,
}

impl RangeSummary {
    pub fn new(
        start_date: ObservationDate,
        end_date: ObservationDate,
        summary: TemperatureSummary,
    ) -> Self {
        Self {
            start_date,
            end_date,
            temp_min: summary.temp_min,
            temp_avg: summary.temp_avg,
            temp_max: summary.temp_max,
        }
    }
}

// ============================================================================
// Health Check
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    pub path: String,
    pub size_bytes: Option<u64>,
}
