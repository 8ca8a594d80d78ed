#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Entry point for the cdr-map API server.
//!
//! Loads the CDR CSV named by `CDR_MAP_CSV` (or the first CLI
//! argument) into the immutable record store, then serves the
//! filtering pipeline over REST for the external map and graph
//! renderers.

use std::sync::Arc;

use cdr_map_store::RecordStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let csv_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CDR_MAP_CSV").ok())
        .unwrap_or_else(|| {
            eprintln!("Usage: cdr_map_server <cdr.csv> (or set CDR_MAP_CSV)");
            std::process::exit(2);
        });

    log::info!("Loading CDR records from {csv_path}...");
    let store = match RecordStore::from_csv_path(&csv_path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to load {csv_path}: {e}");
            std::process::exit(1);
        }
    };

    if store.is_empty() {
        log::warn!("{csv_path} contains no records; all views will be empty");
    }

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    cdr_map_server::run(Arc::new(store), &bind_addr, port).await
}
