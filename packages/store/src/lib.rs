#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Immutable in-memory store of parsed CDR records.
//!
//! The store is constructed once from raw input and never mutated;
//! every downstream view (filtering, geo projection, graph building)
//! only selects subsets of it. Ingestion is all-or-nothing: a single
//! unparseable timestamp or a missing required column fails the whole
//! load rather than producing a partial store.

pub mod csv;

use std::collections::BTreeSet;

use cdr_map_cdr_models::{CdrRecord, START_TIME_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};

pub use crate::csv::RawCdrRow;

/// Errors that can occur while loading a record store.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// CSV reading or deserialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is absent from the input header.
    #[error("missing required column {column:?}")]
    MissingColumn {
        /// Name of the absent column.
        column: &'static str,
    },

    /// A `start_time` value did not match the expected format.
    #[error("row {row}: invalid start_time {value:?} (expected DD-MM-YYYY HH:MM): {source}")]
    Timestamp {
        /// 1-based data row number.
        row: usize,
        /// The offending timestamp text.
        value: String,
        /// The underlying parse error.
        source: chrono::ParseError,
    },
}

/// Immutable, ordered collection of parsed CDR records.
///
/// Ingestion order is preserved and is the order every filtered view
/// reports records in.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<CdrRecord>,
}

impl RecordStore {
    /// Builds a store from raw rows, eagerly parsing every timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Timestamp`] (naming the row) if any
    /// `start_time` fails to parse. No partial store is returned.
    pub fn from_rows(rows: Vec<RawCdrRow>) -> Result<Self, IngestError> {
        let mut records = Vec::with_capacity(rows.len());

        for (i, row) in rows.into_iter().enumerate() {
            let start_time = NaiveDateTime::parse_from_str(&row.start_time, START_TIME_FORMAT)
                .map_err(|source| IngestError::Timestamp {
                    row: i + 1,
                    value: row.start_time.clone(),
                    source,
                })?;

            records.push(CdrRecord {
                caller: row.caller,
                callee: row.callee,
                start_time,
                lat: row.lat,
                lon: row.lon,
            });
        }

        log::info!("Loaded {} CDR records", records.len());

        Ok(Self { records })
    }

    /// All records in ingestion order.
    #[must_use]
    pub fn records(&self) -> &[CdrRecord] {
        &self.records
    }

    /// Distinct calendar dates present in the store, ascending.
    #[must_use]
    pub fn distinct_dates(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self.records.iter().map(CdrRecord::date).collect();
        dates.into_iter().collect()
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(caller: &str, callee: &str, start_time: &str) -> RawCdrRow {
        RawCdrRow {
            caller: caller.to_string(),
            callee: callee.to_string(),
            start_time: start_time.to_string(),
            lat: Some(1.0),
            lon: Some(2.0),
        }
    }

    #[test]
    fn preserves_ingestion_order() {
        let store = RecordStore::from_rows(vec![
            row("333", "222", "02-01-2024 09:00"),
            row("111", "222", "01-01-2024 10:00"),
        ])
        .unwrap();

        let callers: Vec<&str> = store.records().iter().map(|r| r.caller.as_str()).collect();
        assert_eq!(callers, ["333", "111"]);
    }

    #[test]
    fn distinct_dates_sorted_without_duplicates() {
        let store = RecordStore::from_rows(vec![
            row("a", "b", "02-01-2024 09:00"),
            row("a", "b", "01-01-2024 10:00"),
            row("a", "b", "01-01-2024 11:00"),
        ])
        .unwrap();

        let dates: Vec<String> = store
            .distinct_dates()
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn bad_timestamp_fails_the_whole_load() {
        let result = RecordStore::from_rows(vec![
            row("a", "b", "01-01-2024 10:00"),
            row("a", "b", "2024-01-01 10:00"),
        ]);

        match result {
            Err(IngestError::Timestamp { row, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "2024-01-01 10:00");
            }
            other => panic!("expected timestamp error, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_yields_empty_store() {
        let store = RecordStore::from_rows(Vec::new()).unwrap();
        assert!(store.is_empty());
        assert!(store.distinct_dates().is_empty());
    }
}
