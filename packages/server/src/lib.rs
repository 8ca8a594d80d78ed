#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the cdr-map application.
//!
//! Serves the filtering pipeline over REST: date options, filtered
//! records, map geometry, and the relationship graph. The record store
//! is loaded once at startup and shared immutably across workers, so
//! requests read it concurrently without locking; the per-request
//! offset RNG keeps map responses independent between requests.

pub mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use cdr_map_store::RecordStore;

/// Shared application state.
pub struct AppState {
    /// The immutable record store, loaded at startup.
    pub store: Arc<RecordStore>,
}

/// Runs the API server until shutdown.
///
/// # Errors
///
/// Returns an error if the listener cannot bind.
pub async fn run(store: Arc<RecordStore>, bind_addr: &str, port: u16) -> std::io::Result<()> {
    log::info!("Starting server on {bind_addr}:{port}");

    let state = web::Data::new(AppState { store });

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/dates", web::get().to(handlers::dates))
                    .route("/records", web::get().to(handlers::records))
                    .route("/map", web::get().to(handlers::map))
                    .route("/graph", web::get().to(handlers::graph)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
