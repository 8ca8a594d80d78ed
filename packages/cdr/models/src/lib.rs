#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Core CDR domain types.
//!
//! This crate defines the canonical call record type shared across the
//! entire cdr-map system, plus the date selection type used to scope
//! filtering to a single calendar day (or all days).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The timestamp format CDR exports use for `start_time`.
pub const START_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// One call event from a CDR export.
///
/// Coordinates locate the *serving tower* of the caller, not either
/// party. A record may lack coordinates entirely; such records are
/// still valid for tabular and graph views and are only skipped by the
/// geospatial projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdrRecord {
    /// Calling party identifier (phone number or similar). Compared by
    /// substring, never assumed numeric.
    pub caller: String,
    /// Called party identifier, same constraints as `caller`.
    pub callee: String,
    /// When the call started.
    pub start_time: NaiveDateTime,
    /// Serving tower latitude, if known.
    pub lat: Option<f64>,
    /// Serving tower longitude, if known.
    pub lon: Option<f64>,
}

impl CdrRecord {
    /// Calendar date of the call, with the time component truncated.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Serving tower coordinates, present only when both are known.
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// A date scope for filtering: every date, or one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateSelection {
    /// Match records on any date.
    All,
    /// Match records whose truncated `start_time` equals this day.
    Day(NaiveDate),
}

impl DateSelection {
    /// Whether a record's calendar date falls inside this selection.
    #[must_use]
    pub fn matches(&self, record: &CdrRecord) -> bool {
        match self {
            Self::All => true,
            Self::Day(day) => record.date() == *day,
        }
    }
}

impl std::fmt::Display for DateSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
        }
    }
}

impl std::str::FromStr for DateSelection {
    type Err = InvalidDateSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self::Day)
            .map_err(|_| InvalidDateSelectionError {
                value: trimmed.to_string(),
            })
    }
}

/// Error returned when parsing a [`DateSelection`] from an invalid
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateSelectionError {
    /// The invalid selection string that was provided.
    pub value: String,
}

impl std::fmt::Display for InvalidDateSelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date selection {:?}: expected \"All\" or YYYY-MM-DD",
            self.value
        )
    }
}

impl std::error::Error for InvalidDateSelectionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(caller: &str, callee: &str, start: &str) -> CdrRecord {
        CdrRecord {
            caller: caller.to_string(),
            callee: callee.to_string(),
            start_time: NaiveDateTime::parse_from_str(start, START_TIME_FORMAT).unwrap(),
            lat: Some(1.0),
            lon: Some(2.0),
        }
    }

    #[test]
    fn truncates_start_time_to_date() {
        let rec = record("111", "222", "01-01-2024 10:30");
        assert_eq!(rec.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn coordinates_require_both_components() {
        let mut rec = record("111", "222", "01-01-2024 10:30");
        assert_eq!(rec.coordinates(), Some((1.0, 2.0)));
        rec.lon = None;
        assert_eq!(rec.coordinates(), None);
    }

    #[test]
    fn all_selection_matches_any_date() {
        let rec = record("111", "222", "15-06-2023 08:00");
        assert!(DateSelection::All.matches(&rec));
    }

    #[test]
    fn day_selection_matches_calendar_date_only() {
        let rec = record("111", "222", "15-06-2023 08:00");
        let same_day = DateSelection::Day(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
        let other_day = DateSelection::Day(NaiveDate::from_ymd_opt(2023, 6, 16).unwrap());
        assert!(same_day.matches(&rec));
        assert!(!other_day.matches(&rec));
    }

    #[test]
    fn parses_all_and_dates() {
        assert_eq!("All".parse::<DateSelection>().unwrap(), DateSelection::All);
        assert_eq!("all".parse::<DateSelection>().unwrap(), DateSelection::All);
        assert_eq!(
            "2024-01-01".parse::<DateSelection>().unwrap(),
            DateSelection::Day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
    }

    #[test]
    fn rejects_malformed_selection() {
        let err = "01-01-2024".parse::<DateSelection>().unwrap_err();
        assert!(err.to_string().contains("01-01-2024"));
    }

    #[test]
    fn displays_round_trip_forms() {
        assert_eq!(DateSelection::All.to_string(), "All");
        let day = DateSelection::Day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(day.to_string(), "2024-01-01");
    }
}
