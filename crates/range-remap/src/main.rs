//! CLI entry point for the range remapping engine.
//!
//! Usage:
//!   range-remap apply <input.json> [options]
//!   range-remap apply --stdin [options]
//!
//! The input document carries the layer sequence plus the initial values,
//! either as intervals or as single points (length-1 intervals):
//!
//! ```json
//! {
//!   "points": [79, 14],
//!   "intervals": [{ "start": 55, "length": 13 }],
//!   "layers": [
//!     { "rules": [{ "sourceStart": 50, "destinationStart": 52, "length": 48 }] }
//!   ]
//! }
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use range_remap::{Interval, Layer, Pipeline};

#[derive(Parser)]
#[command(name = "range-remap")]
#[command(about = "Layered interval remapping engine for range-translation puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run intervals through a layer sequence and report the result
    Apply {
        /// Path to input JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read input from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Only print the minimum output start, as a bare number
        #[arg(long)]
        min_only: bool,
    },
}

/// Input document: layer sequence plus initial values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PipelineInput {
    /// Single values, treated as length-1 intervals.
    #[serde(default)]
    points: Vec<i64>,
    #[serde(default)]
    intervals: Vec<Interval>,
    layers: Vec<Layer>,
}

/// Output format for the apply result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineOutput {
    min_start: Option<i64>,
    interval_count: usize,
    total_length: i64,
    intervals: Vec<Interval>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            file,
            stdin,
            min_only,
        } => {
            let json_content = if stdin {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .expect("Failed to read from stdin");
                buffer
            } else if let Some(path) = file {
                fs::read_to_string(&path)
                    .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
            } else {
                eprintln!("Error: Must provide either a file path or --stdin");
                std::process::exit(1);
            };

            // Parse and validate; layer construction errors surface here
            let input: PipelineInput = match serde_json::from_str(&json_content) {
                Ok(input) => input,
                Err(e) => {
                    eprintln!("Error parsing input JSON: {}", e);
                    std::process::exit(1);
                }
            };

            let mut intervals = input.intervals;
            intervals.extend(input.points.iter().copied().map(Interval::point));

            log::info!(
                "applying {} layers to {} intervals",
                input.layers.len(),
                intervals.len()
            );

            let pipeline = Pipeline::new(input.layers);
            let output = format_result(pipeline.apply(&intervals));

            if min_only {
                match output.min_start {
                    Some(min) => println!("{}", min),
                    None => {
                        eprintln!("Error: empty working set, no minimum");
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            }
        }
    }
}

fn format_result(mut intervals: Vec<Interval>) -> PipelineOutput {
    // The engine emits an unordered multiset; sort for stable presentation
    intervals.sort_by_key(|interval| (interval.start(), interval.length()));
    PipelineOutput {
        min_start: intervals.first().map(Interval::start),
        interval_count: intervals.len(),
        total_length: intervals.iter().map(Interval::length).sum(),
        intervals,
    }
}
