#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the cdr-map server.
//!
//! These types are serialized to JSON for the REST API and for the CLI
//! export documents. The map and graph responses are exactly what the
//! external renderers consume; the style constants they carry are
//! presentation policy passed through verbatim, never interpreted by
//! the core.

use cdr_map_cdr_models::CdrRecord;
use cdr_map_geo::{GeoLink, GeoPoint, GeoProjection};
use cdr_map_graph::CallGraph;
use serde::{Deserialize, Serialize};

/// Initial zoom level for the map view.
pub const MAP_ZOOM: u8 = 9;
/// Tower marker radius in meters.
pub const POINT_RADIUS: u32 = 120;
/// Tower marker fill color (RGB).
pub const POINT_COLOR: [u8; 3] = [255, 0, 0];
/// Call link line color (RGB).
pub const LINE_COLOR: [u8; 3] = [0, 255, 0];
/// Call link line width in pixels.
pub const LINE_WIDTH: u32 = 4;

/// Notice shown when a filter cycle selects nothing.
pub const NO_RECORDS_NOTICE: &str = "No records to display for the selected filters.";

/// Tooltip text for one call link.
#[must_use]
pub fn link_tooltip(caller: &str, callee: &str) -> String {
    format!("Caller: {caller}\nCallee: {callee}")
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Query parameters for the records endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQueryParams {
    /// Date selection: `All` (default) or `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Caller/callee substring query; blank matches everything.
    pub q: Option<String>,
}

/// Query parameters for the map endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQueryParams {
    /// Date selection: `All` (default) or `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Caller/callee substring query; blank matches everything.
    pub q: Option<String>,
    /// Offset RNG seed, for reproducible link geometry.
    pub seed: Option<u64>,
}

/// Query parameters for the graph endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQueryParams {
    /// Date selection: `All` (default) or `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Caller/callee substring query; blank matches everything.
    pub q: Option<String>,
    /// Edge policy: `multi` (default) or `dedup`.
    pub edges: Option<String>,
}

/// Filtered tabular records response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsResponse {
    /// Matching records in ingestion order.
    pub records: Vec<CdrRecord>,
    /// Number of matching records.
    pub total_count: usize,
    /// Present when the filter selected nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Fixed visual styling the map renderer applies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStyle {
    /// Tower marker radius in meters.
    pub point_radius: u32,
    /// Tower marker fill color (RGB).
    pub point_color: [u8; 3],
    /// Call link line color (RGB).
    pub line_color: [u8; 3],
    /// Call link line width in pixels.
    pub line_width: u32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            point_radius: POINT_RADIUS,
            point_color: POINT_COLOR,
            line_color: LINE_COLOR,
            line_width: LINE_WIDTH,
        }
    }
}

/// A call link with its rendered tooltip text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLink {
    /// Link geometry and party labels.
    #[serde(flatten)]
    pub link: GeoLink,
    /// Tooltip text for this link.
    pub tooltip: String,
}

impl From<GeoLink> for ApiLink {
    fn from(link: GeoLink) -> Self {
        let tooltip = link_tooltip(&link.caller, &link.callee);
        Self { link, tooltip }
    }
}

/// Geometry document handed to the map renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResponse {
    /// View center, or `None` for an empty map.
    pub anchor: Option<GeoPoint>,
    /// Initial zoom level.
    pub zoom: u8,
    /// Tower markers.
    pub points: Vec<GeoPoint>,
    /// Caller→callee lines with tooltips.
    pub links: Vec<ApiLink>,
    /// Records excluded for lacking coordinates.
    pub skipped: usize,
    /// Fixed visual styling.
    pub style: MapStyle,
    /// Present when the filter selected nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl MapResponse {
    /// Wraps a projection for the renderer, attaching style constants,
    /// tooltips, and the empty-result notice. The notice also covers a
    /// non-empty filtered set whose records all lack coordinates: the
    /// map would otherwise be silently blank.
    #[must_use]
    pub fn from_projection(projection: GeoProjection, filtered_count: usize) -> Self {
        let notice = (filtered_count == 0 || projection.points.is_empty())
            .then(|| NO_RECORDS_NOTICE.to_string());
        Self {
            anchor: projection.anchor,
            zoom: MAP_ZOOM,
            points: projection.points,
            links: projection.links.into_iter().map(ApiLink::from).collect(),
            skipped: projection.skipped,
            style: MapStyle::default(),
            notice,
        }
    }
}

/// Node/edge document handed to the graph renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResponse {
    /// The reduced relationship graph.
    #[serde(flatten)]
    pub graph: CallGraph,
    /// Present when the filter selected nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl GraphResponse {
    /// Wraps a graph for the renderer, attaching the empty-result
    /// notice.
    #[must_use]
    pub fn new(graph: CallGraph, filtered_count: usize) -> Self {
        let notice = (filtered_count == 0).then(|| NO_RECORDS_NOTICE.to_string());
        Self { graph, notice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_follows_template() {
        assert_eq!(link_tooltip("111", "222"), "Caller: 111\nCallee: 222");
    }

    #[test]
    fn empty_map_response_carries_notice() {
        let projection = GeoProjection {
            anchor: None,
            points: Vec::new(),
            links: Vec::new(),
            skipped: 0,
        };
        let response = MapResponse::from_projection(projection, 0);
        assert_eq!(response.notice.as_deref(), Some(NO_RECORDS_NOTICE));
        assert_eq!(response.zoom, MAP_ZOOM);
    }

    #[test]
    fn coordinate_less_filtered_set_still_carries_notice() {
        let projection = GeoProjection {
            anchor: None,
            points: Vec::new(),
            links: Vec::new(),
            skipped: 2,
        };
        let response = MapResponse::from_projection(projection, 2);
        assert_eq!(response.notice.as_deref(), Some(NO_RECORDS_NOTICE));
        assert_eq!(response.skipped, 2);
    }

    #[test]
    fn non_empty_map_response_has_no_notice() {
        let projection = GeoProjection {
            anchor: Some(GeoPoint { lat: 1.0, lon: 2.0 }),
            points: vec![GeoPoint { lat: 1.0, lon: 2.0 }],
            links: Vec::new(),
            skipped: 0,
        };
        let response = MapResponse::from_projection(projection, 1);
        assert!(response.notice.is_none());
    }

    #[test]
    fn links_gain_tooltips() {
        let projection = GeoProjection {
            anchor: Some(GeoPoint { lat: 1.0, lon: 2.0 }),
            points: vec![GeoPoint { lat: 1.0, lon: 2.0 }],
            links: vec![GeoLink {
                from_lat: 1.0,
                from_lon: 2.0,
                to_lat: 1.02,
                to_lon: 2.02,
                caller: "111".to_string(),
                callee: "222".to_string(),
            }],
            skipped: 0,
        };
        let response = MapResponse::from_projection(projection, 1);
        assert_eq!(response.links[0].tooltip, "Caller: 111\nCallee: 222");
    }
}
