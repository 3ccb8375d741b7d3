//! Date handling for path segments and the trailing-year window
//!
//! Dates are stored as `YYYY-MM-DD` text, so comparing the rendered form of
//! a parsed date against the column orders exactly like the dates do.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Serialize, Serializer};

/// Format used by path segments and by the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Last date present in the Hawaii dataset.
pub const DEFAULT_ANCHOR_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2017, 8, 23) {
    Some(date) => date,
    None => panic!("invalid anchor date"),
};

/// Length of the trailing window used by the tobs route.
pub const LOOKBACK_DAYS: u64 = 365;

/// Years that render as exactly four digits under [`DATE_FORMAT`].
const FOUR_DIGIT_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// A date segment that failed to parse
#[derive(Debug, thiserror::Error)]
#[error("{field} '{value}' is not a valid YYYY-MM-DD date: {source}")]
pub struct DateError {
    pub field: &'static str,
    pub value: String,
    #[source]
    pub source: InvalidDate,
}

/// Why a date segment was rejected
#[derive(Debug, thiserror::Error)]
pub enum InvalidDate {
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),

    /// Signed or five-digit years parse but do not sort like the column.
    #[error("year {0} is outside 0000..=9999")]
    YearOutOfRange(i32),
}

/// A calendar date taken from a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObservationDate(NaiveDate);

impl ObservationDate {
    /// Parse a `YYYY-MM-DD` segment, keeping the parser's error.
    ///
    /// # Example
    /// ```
    /// use surfsup_server::dates::ObservationDate;
    ///
    /// assert!(ObservationDate::parse("start", "2017-01-01").is_ok());
    /// assert!(ObservationDate::parse("start", "2017-13-40").is_err());
    /// assert!(ObservationDate::parse("start", "+10000-01-01").is_err());
    /// ```
    pub fn parse(field: &'static str, value: &str) -> Result<Self, DateError> {
        Self::parse_naive(value).map_err(|source| DateError {
            field,
            value: value.to_owned(),
            source,
        })
    }

    fn parse_naive(value: &str) -> Result<Self, InvalidDate> {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT)?;
        if !FOUR_DIGIT_YEARS.contains(&date.year()) {
            return Err(InvalidDate::YearOutOfRange(date.year()));
        }
        Ok(Self(date))
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Rendered form used for SQL comparisons against the `date` column.
    pub fn to_column(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

impl From<NaiveDate> for ObservationDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for ObservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for ObservationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inclusive lower bound of the year preceding `anchor`.
pub fn lookback_start(anchor: NaiveDate) -> ObservationDate {
    // NaiveDate::MIN is the only way this saturates
    let start = anchor
        .checked_sub_days(Days::new(LOOKBACK_DAYS))
        .unwrap_or(NaiveDate::MIN);
    ObservationDate(start)
}
