//! CSV ingestion adapter.
//!
//! Reads a row-oriented CDR export into raw rows for the store to
//! parse. Header validation happens here so a malformed upload fails
//! with the name of the missing column instead of a row-level serde
//! error.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{IngestError, RecordStore};

/// Columns every CDR export must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["caller", "callee", "start_time", "lat", "lon"];

/// One unparsed CSV row. `start_time` stays textual until the store
/// parses the whole column eagerly; blank coordinate fields become
/// `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCdrRow {
    /// Calling party identifier.
    pub caller: String,
    /// Called party identifier.
    pub callee: String,
    /// Call start timestamp, `DD-MM-YYYY HH:MM`.
    pub start_time: String,
    /// Serving tower latitude, if present.
    pub lat: Option<f64>,
    /// Serving tower longitude, if present.
    pub lon: Option<f64>,
}

/// Reads and validates CSV input into raw rows.
///
/// # Errors
///
/// Returns [`IngestError::MissingColumn`] if a required column is
/// absent from the header, or [`IngestError::Csv`] if reading or row
/// deserialization fails.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawCdrRow>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(IngestError::MissingColumn { column });
        }
    }

    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }

    Ok(rows)
}

impl RecordStore {
    /// Loads a store from CSV text.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] if the header is missing a required
    /// column, a row fails to deserialize, or a timestamp fails to
    /// parse.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        Self::from_rows(read_rows(reader)?)
    }

    /// Loads a store from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] if the file cannot be read or its
    /// content fails validation.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, IngestError> {
        let path = path.as_ref();
        log::info!("Reading CDR CSV from {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }
}
