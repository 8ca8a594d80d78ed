#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Geospatial projection of filtered CDR records.
//!
//! Maps each coordinate-bearing record to a tower point and a
//! caller→callee link, and computes the centroid used to anchor the
//! map view. Records without coordinates are skipped here and only
//! here; every other view still sees them.
//!
//! The dataset carries no true callee tower location, so link targets
//! are the source coordinates plus a small synthetic offset. The
//! offset exists purely as a visual divergence cue and is pluggable:
//! the default draws uniformly from [0.01, 0.03] degrees, and a fixed
//! strategy exists for deterministic contexts.

use cdr_map_cdr_models::CdrRecord;
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use serde::{Deserialize, Serialize};

/// Lower bound of the default synthetic offset, in degrees.
pub const OFFSET_MIN_DEG: f64 = 0.01;
/// Upper bound of the default synthetic offset, in degrees.
pub const OFFSET_MAX_DEG: f64 = 0.03;

/// A tower marker position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// A rendered caller→callee line.
///
/// Target coordinates are synthetic (source plus offset), not a real
/// callee tower position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLink {
    /// Source (serving tower) latitude.
    pub from_lat: f64,
    /// Source (serving tower) longitude.
    pub from_lon: f64,
    /// Synthetic target latitude.
    pub to_lat: f64,
    /// Synthetic target longitude.
    pub to_lon: f64,
    /// Calling party, for tooltips.
    pub caller: String,
    /// Called party, for tooltips.
    pub callee: String,
}

/// Output of one projection cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoProjection {
    /// Centroid of all projected points; `None` when nothing had
    /// coordinates, which renderers show as an empty map.
    pub anchor: Option<GeoPoint>,
    /// One marker per coordinate-bearing record.
    pub points: Vec<GeoPoint>,
    /// One link per coordinate-bearing record.
    pub links: Vec<GeoLink>,
    /// Records excluded for lacking coordinates, for diagnostics.
    pub skipped: usize,
}

/// Source of synthetic per-link target offsets.
///
/// Implementations are request-local: one strategy instance serves one
/// projection cycle, so no synchronization is needed when the store is
/// served concurrently.
pub trait OffsetStrategy {
    /// Draws the next `(lat, lon)` offset pair in degrees.
    fn next_offset(&mut self) -> (f64, f64);
}

/// Default strategy: both components drawn independently and uniformly
/// from [`OFFSET_MIN_DEG`, `OFFSET_MAX_DEG`].
#[derive(Debug)]
pub struct UniformOffset {
    rng: StdRng,
}

impl UniformOffset {
    /// Strategy with an OS-entropy seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Strategy with a fixed seed, for reproducible output.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformOffset {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetStrategy for UniformOffset {
    fn next_offset(&mut self) -> (f64, f64) {
        (
            self.rng.gen_range(OFFSET_MIN_DEG..=OFFSET_MAX_DEG),
            self.rng.gen_range(OFFSET_MIN_DEG..=OFFSET_MAX_DEG),
        )
    }
}

/// Constant offset, for deterministic rendering and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffset {
    /// Latitude offset in degrees.
    pub lat: f64,
    /// Longitude offset in degrees.
    pub lon: f64,
}

impl OffsetStrategy for FixedOffset {
    fn next_offset(&mut self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// Projects a filtered record set into map geometry.
///
/// Records lacking either coordinate produce neither a point nor a
/// link and are tallied in `skipped`. The anchor is the arithmetic
/// mean of the projected coordinates, or `None` when there are none.
pub fn project(filtered: &[&CdrRecord], offsets: &mut impl OffsetStrategy) -> GeoProjection {
    let mut points = Vec::new();
    let mut links = Vec::new();
    let mut skipped = 0;
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;

    for record in filtered {
        let Some((lat, lon)) = record.coordinates() else {
            skipped += 1;
            continue;
        };

        lat_sum += lat;
        lon_sum += lon;
        points.push(GeoPoint { lat, lon });

        let (lat_offset, lon_offset) = offsets.next_offset();
        links.push(GeoLink {
            from_lat: lat,
            from_lon: lon,
            to_lat: lat + lat_offset,
            to_lon: lon + lon_offset,
            caller: record.caller.clone(),
            callee: record.callee.clone(),
        });
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} records without coordinates");
    }

    #[allow(clippy::cast_precision_loss)]
    let anchor = if points.is_empty() {
        None
    } else {
        Some(GeoPoint {
            lat: lat_sum / points.len() as f64,
            lon: lon_sum / points.len() as f64,
        })
    };

    GeoProjection {
        anchor,
        points,
        links,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdr_map_cdr_models::START_TIME_FORMAT;
    use chrono::NaiveDateTime;

    fn record(caller: &str, callee: &str, lat: Option<f64>, lon: Option<f64>) -> CdrRecord {
        CdrRecord {
            caller: caller.to_string(),
            callee: callee.to_string(),
            start_time: NaiveDateTime::parse_from_str("01-01-2024 10:00", START_TIME_FORMAT)
                .unwrap(),
            lat,
            lon,
        }
    }

    #[test]
    fn one_point_and_link_per_coordinate_bearing_record() {
        let a = record("A", "B", Some(1.0), Some(2.0));
        let b = record("A", "C", Some(1.1), Some(2.1));
        let filtered = vec![&a, &b];

        let projection = project(&filtered, &mut UniformOffset::with_seed(7));
        assert_eq!(projection.points.len(), 2);
        assert_eq!(projection.links.len(), 2);
        assert_eq!(projection.skipped, 0);
    }

    #[test]
    fn anchor_is_arithmetic_mean() {
        let a = record("A", "B", Some(1.0), Some(2.0));
        let b = record("A", "C", Some(1.1), Some(2.1));
        let filtered = vec![&a, &b];

        let projection = project(&filtered, &mut UniformOffset::with_seed(7));
        let anchor = projection.anchor.unwrap();
        assert!((anchor.lat - 1.05).abs() < 1e-9);
        assert!((anchor.lon - 2.05).abs() < 1e-9);
    }

    #[test]
    fn records_without_coordinates_are_skipped_and_counted() {
        let a = record("A", "B", Some(1.0), Some(2.0));
        let b = record("A", "C", None, Some(2.1));
        let c = record("B", "A", Some(1.2), None);
        let filtered = vec![&a, &b, &c];

        let projection = project(&filtered, &mut UniformOffset::with_seed(7));
        assert_eq!(projection.points.len(), 1);
        assert_eq!(projection.links.len(), 1);
        assert_eq!(projection.skipped, 2);
    }

    #[test]
    fn no_coordinates_means_no_anchor() {
        let a = record("A", "B", None, None);
        let filtered = vec![&a];

        let projection = project(&filtered, &mut UniformOffset::with_seed(7));
        assert!(projection.anchor.is_none());
        assert!(projection.points.is_empty());
        assert_eq!(projection.skipped, 1);
    }

    #[test]
    fn empty_input_projects_to_empty_output() {
        let projection = project(&[], &mut UniformOffset::with_seed(7));
        assert!(projection.anchor.is_none());
        assert!(projection.points.is_empty());
        assert!(projection.links.is_empty());
        assert_eq!(projection.skipped, 0);
    }

    #[test]
    fn uniform_offsets_stay_within_bounds() {
        let records: Vec<CdrRecord> = (0..50)
            .map(|i| record("A", "B", Some(f64::from(i)), Some(f64::from(i))))
            .collect();
        let filtered: Vec<&CdrRecord> = records.iter().collect();

        let projection = project(&filtered, &mut UniformOffset::with_seed(42));
        for link in &projection.links {
            let lat_offset = link.to_lat - link.from_lat;
            let lon_offset = link.to_lon - link.from_lon;
            assert!((OFFSET_MIN_DEG..=OFFSET_MAX_DEG).contains(&lat_offset));
            assert!((OFFSET_MIN_DEG..=OFFSET_MAX_DEG).contains(&lon_offset));
        }
    }

    #[test]
    fn seeded_strategy_is_reproducible() {
        let a = record("A", "B", Some(1.0), Some(2.0));
        let filtered = vec![&a];

        let first = project(&filtered, &mut UniformOffset::with_seed(9));
        let second = project(&filtered, &mut UniformOffset::with_seed(9));
        assert_eq!(first.links, second.links);
    }

    #[test]
    fn fixed_offset_shifts_targets_exactly() {
        let a = record("A", "B", Some(1.0), Some(2.0));
        let filtered = vec![&a];

        let mut offsets = FixedOffset {
            lat: 0.02,
            lon: 0.01,
        };
        let projection = project(&filtered, &mut offsets);
        assert!((projection.links[0].to_lat - 1.02).abs() < 1e-12);
        assert!((projection.links[0].to_lon - 2.01).abs() < 1e-12);
    }
}
