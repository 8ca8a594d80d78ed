#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Caller/callee relationship graph built from filtered CDR records.
//!
//! The builder reduces a filtered record set to a node set (every
//! caller and callee identifier) and a directed edge list. The graph
//! is a plain immutable value handed to an external renderer; no
//! renderer-specific state lives here.

use std::collections::BTreeSet;

use cdr_map_cdr_models::CdrRecord;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How repeated (caller, callee) pairs are treated.
///
/// The default keeps one edge per record, so two calls between the
/// same parties produce two edges. `Dedup` collapses repeats, keeping
/// first-occurrence order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EdgePolicy {
    /// One edge per record; duplicates preserved.
    #[default]
    Multi,
    /// Repeated (caller, callee) pairs collapse to one edge.
    Dedup,
}

/// A directed caller→callee edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEdge {
    /// Calling party.
    pub caller: String,
    /// Called party.
    pub callee: String,
}

/// The reduced relationship graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallGraph {
    /// Every identifier appearing as caller or callee, sorted.
    pub nodes: BTreeSet<String>,
    /// Directed edges in record order.
    pub edges: Vec<CallEdge>,
}

impl CallGraph {
    /// Whether the graph has no nodes (and therefore no edges).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds the relationship graph for a filtered record set.
///
/// An empty input yields an empty graph; no placeholder nodes are
/// invented.
#[must_use]
pub fn build(filtered: &[&CdrRecord], policy: EdgePolicy) -> CallGraph {
    let mut nodes = BTreeSet::new();
    let mut edges = Vec::with_capacity(filtered.len());
    let mut seen = BTreeSet::new();

    for record in filtered {
        nodes.insert(record.caller.clone());
        nodes.insert(record.callee.clone());

        if policy == EdgePolicy::Dedup {
            let key = (record.caller.clone(), record.callee.clone());
            if !seen.insert(key) {
                continue;
            }
        }

        edges.push(CallEdge {
            caller: record.caller.clone(),
            callee: record.callee.clone(),
        });
    }

    CallGraph { nodes, edges }
}
