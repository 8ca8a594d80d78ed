#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line interface for the cdr-map pipeline.
//!
//! Loads a CDR CSV, runs one filter cycle, and either prints the
//! results or writes the map and graph renderer documents as JSON.

mod pipeline;

use std::path::PathBuf;

use cdr_map_cdr_models::DateSelection;
use cdr_map_graph::EdgePolicy;
use cdr_map_store::RecordStore;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cdr_map", about = "CDR filtering and mapping toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the selectable date options for a CDR CSV.
    Dates {
        /// Path to the CDR CSV file.
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print the records matching a date selection and search query.
    Records {
        /// Path to the CDR CSV file.
        #[arg(long)]
        csv: PathBuf,
        /// Date selection: "All" or YYYY-MM-DD.
        #[arg(long, default_value = "All")]
        date: String,
        /// Caller/callee substring query; blank matches everything.
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Write the map and graph renderer documents as JSON.
    Export {
        /// Path to the CDR CSV file.
        #[arg(long)]
        csv: PathBuf,
        /// Date selection: "All" or YYYY-MM-DD.
        #[arg(long, default_value = "All")]
        date: String,
        /// Caller/callee substring query; blank matches everything.
        #[arg(long, default_value = "")]
        query: String,
        /// Offset RNG seed, for reproducible link geometry.
        #[arg(long)]
        seed: Option<u64>,
        /// Edge policy: multi (one edge per record) or dedup.
        #[arg(long, default_value = "multi")]
        edges: String,
        /// Output path for the map document.
        #[arg(long, default_value = "map.json")]
        map_out: PathBuf,
        /// Output path for the graph document.
        #[arg(long, default_value = "graph.json")]
        graph_out: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    match cli.command {
        Command::Dates { csv } => {
            let store = RecordStore::from_csv_path(csv)?;
            for option in cdr_map_filter::date_options(&store) {
                println!("{option}");
            }
        }
        Command::Records { csv, date, query } => {
            let store = RecordStore::from_csv_path(csv)?;
            let selection: DateSelection = date.parse()?;
            let filtered = cdr_map_filter::filter(&store, &selection, &query);

            if filtered.is_empty() {
                println!("{}", cdr_map_server_models::NO_RECORDS_NOTICE);
            }
            for record in &filtered {
                let coords = record.coordinates().map_or_else(
                    || "-".to_string(),
                    |(lat, lon)| format!("{lat},{lon}"),
                );
                println!(
                    "{}\t{} -> {}\t{}",
                    record.start_time.format("%d-%m-%Y %H:%M"),
                    record.caller,
                    record.callee,
                    coords
                );
            }
            log::info!("{} records matched", filtered.len());
        }
        Command::Export {
            csv,
            date,
            query,
            seed,
            edges,
            map_out,
            graph_out,
        } => {
            let store = RecordStore::from_csv_path(csv)?;
            let selection: DateSelection = date.parse()?;
            let policy: EdgePolicy = edges.parse()?;

            let output = pipeline::run_cycle(
                &store,
                &pipeline::CycleParams {
                    selection,
                    query,
                    policy,
                    seed,
                },
            );

            serde_json::to_writer_pretty(std::fs::File::create(&map_out)?, &output.map)?;
            serde_json::to_writer_pretty(std::fs::File::create(&graph_out)?, &output.graph)?;

            log::info!(
                "Exported {} records to {} and {}",
                output.filtered_count,
                map_out.display(),
                graph_out.display()
            );
            if output.filtered_count == 0 {
                log::warn!("{}", cdr_map_server_models::NO_RECORDS_NOTICE);
            }
        }
    }

    Ok(())
}
