//! HTTP handler functions for the cdr-map API.

use actix_web::{HttpResponse, web};
use cdr_map_cdr_models::DateSelection;
use cdr_map_geo::UniformOffset;
use cdr_map_graph::EdgePolicy;
use cdr_map_server_models::{
    ApiHealth, GraphQueryParams, GraphResponse, MapQueryParams, MapResponse, NO_RECORDS_NOTICE,
    RecordQueryParams, RecordsResponse,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/dates`
///
/// Returns the selectable date options: `"All"` first, then every
/// distinct record date ascending.
pub async fn dates(state: web::Data<AppState>) -> HttpResponse {
    let options: Vec<String> = cdr_map_filter::date_options(&state.store)
        .iter()
        .map(ToString::to_string)
        .collect();

    HttpResponse::Ok().json(options)
}

/// `GET /api/records`
///
/// Returns the filtered tabular view for a date selection and search
/// query.
pub async fn records(
    state: web::Data<AppState>,
    params: web::Query<RecordQueryParams>,
) -> HttpResponse {
    let selection = match parse_selection(params.date.as_deref()) {
        Ok(selection) => selection,
        Err(response) => return response,
    };
    let query = params.q.as_deref().unwrap_or("");

    let filtered = cdr_map_filter::filter(&state.store, &selection, query);
    let total_count = filtered.len();
    let notice = (total_count == 0).then(|| NO_RECORDS_NOTICE.to_string());

    HttpResponse::Ok().json(RecordsResponse {
        records: filtered.into_iter().cloned().collect(),
        total_count,
        notice,
    })
}

/// `GET /api/map`
///
/// Returns map geometry for the filtered set: tower points, synthetic
/// caller→callee links, view anchor, and fixed style constants. Pass
/// `seed` for reproducible link offsets.
pub async fn map(state: web::Data<AppState>, params: web::Query<MapQueryParams>) -> HttpResponse {
    let selection = match parse_selection(params.date.as_deref()) {
        Ok(selection) => selection,
        Err(response) => return response,
    };
    let query = params.q.as_deref().unwrap_or("");

    let filtered = cdr_map_filter::filter(&state.store, &selection, query);

    // Request-local RNG: concurrent map requests never share offset state.
    let mut offsets = params
        .seed
        .map_or_else(UniformOffset::new, UniformOffset::with_seed);
    let projection = cdr_map_geo::project(&filtered, &mut offsets);

    HttpResponse::Ok().json(MapResponse::from_projection(projection, filtered.len()))
}

/// `GET /api/graph`
///
/// Returns the caller/callee relationship graph for the filtered set.
/// `edges=dedup` collapses repeated pairs; the default keeps one edge
/// per record.
pub async fn graph(
    state: web::Data<AppState>,
    params: web::Query<GraphQueryParams>,
) -> HttpResponse {
    let selection = match parse_selection(params.date.as_deref()) {
        Ok(selection) => selection,
        Err(response) => return response,
    };
    let query = params.q.as_deref().unwrap_or("");

    let policy = match params.edges.as_deref() {
        None => EdgePolicy::default(),
        Some(value) => match value.parse() {
            Ok(policy) => policy,
            Err(_) => {
                return bad_request(&format!(
                    "invalid edges value {value:?}: expected \"multi\" or \"dedup\""
                ));
            }
        },
    };

    let filtered = cdr_map_filter::filter(&state.store, &selection, query);
    let call_graph = cdr_map_graph::build(&filtered, policy);

    HttpResponse::Ok().json(GraphResponse::new(call_graph, filtered.len()))
}

/// Parses the `date` query parameter, mapping a malformed value to a
/// 400 response. A missing parameter means `All`.
fn parse_selection(date: Option<&str>) -> Result<DateSelection, HttpResponse> {
    match date {
        None => Ok(DateSelection::All),
        Some(value) => value.parse().map_err(|e: cdr_map_cdr_models::InvalidDateSelectionError| {
            log::debug!("Rejected date selection: {e}");
            bad_request(&e.to_string())
        }),
    }
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn missing_date_defaults_to_all() {
        assert_eq!(parse_selection(None).unwrap(), DateSelection::All);
    }

    #[test]
    fn valid_date_parses_to_day() {
        assert_eq!(
            parse_selection(Some("2024-01-01")).unwrap(),
            DateSelection::Day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
    }

    #[test]
    fn malformed_date_is_a_client_error() {
        assert!(parse_selection(Some("yesterday")).is_err());
    }
}
