#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Filtering over the CDR record store.
//!
//! One filter cycle is a pure function of `(store, date selection,
//! search query)`: the date predicate and the search predicate are
//! ANDed over the full store, preserving ingestion order. The store is
//! never mutated and nothing is cached; every selection change
//! recomputes the view from scratch.

use cdr_map_cdr_models::{CdrRecord, DateSelection};
use cdr_map_store::RecordStore;

/// Date options offered for selection: `All`, then every distinct
/// calendar date in the store, ascending.
#[must_use]
pub fn date_options(store: &RecordStore) -> Vec<DateSelection> {
    let mut options = vec![DateSelection::All];
    options.extend(store.distinct_dates().into_iter().map(DateSelection::Day));
    options
}

/// Whether a record matches a caller/callee search query.
///
/// A blank (empty or whitespace-only) query matches everything. Any
/// other query is matched as given, including surrounding whitespace:
/// case-sensitive substring containment on either party.
#[must_use]
pub fn matches_query(record: &CdrRecord, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    record.caller.contains(query) || record.callee.contains(query)
}

/// Selects the records satisfying both the date selection and the
/// search query, in ingestion order.
///
/// An empty result is a valid outcome, not an error; downstream views
/// render it as an explicit "no records" state.
#[must_use]
pub fn filter<'a>(
    store: &'a RecordStore,
    selection: &DateSelection,
    query: &str,
) -> Vec<&'a CdrRecord> {
    store
        .records()
        .iter()
        .filter(|record| selection.matches(record) && matches_query(record, query))
        .collect()
}
