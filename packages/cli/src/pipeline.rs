//! One filter-selection cycle, assembled end to end.
//!
//! A cycle is a pure computation over the immutable store: apply the
//! date and search predicates, then fan the filtered set out to the
//! geo projection and the relationship graph. The outputs are owned by
//! the cycle that produced them; nothing is cached between cycles.

use cdr_map_cdr_models::DateSelection;
use cdr_map_geo::UniformOffset;
use cdr_map_graph::EdgePolicy;
use cdr_map_server_models::{GraphResponse, MapResponse};
use cdr_map_store::RecordStore;

/// Inputs to one filter cycle.
#[derive(Debug, Clone)]
pub struct CycleParams {
    /// Date scope.
    pub selection: DateSelection,
    /// Caller/callee substring query; blank matches everything.
    pub query: String,
    /// Edge policy for the relationship graph.
    pub policy: EdgePolicy,
    /// Offset RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Outputs of one filter cycle: the two renderer documents.
#[derive(Debug, Clone)]
pub struct CycleOutput {
    /// Number of records the filter selected.
    pub filtered_count: usize,
    /// Map renderer document.
    pub map: MapResponse,
    /// Graph renderer document.
    pub graph: GraphResponse,
}

/// Runs one filter cycle over the store.
#[must_use]
pub fn run_cycle(store: &RecordStore, params: &CycleParams) -> CycleOutput {
    let filtered = cdr_map_filter::filter(store, &params.selection, &params.query);
    let filtered_count = filtered.len();

    let mut offsets = params
        .seed
        .map_or_else(UniformOffset::new, UniformOffset::with_seed);
    let projection = cdr_map_geo::project(&filtered, &mut offsets);
    let call_graph = cdr_map_graph::build(&filtered, params.policy);

    CycleOutput {
        filtered_count,
        map: MapResponse::from_projection(projection, filtered_count),
        graph: GraphResponse::new(call_graph, filtered_count),
    }
}
