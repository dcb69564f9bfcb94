//! simbench -- day-by-day batch benchmark runner for an external route simulator.
//!
//! For every calendar day in the configured years the simulator is invoked once,
//! two metrics are grepped from its output and timed, and the three resulting
//! series are written to CSV tables and summarized on the console.

pub mod analysis;
pub mod batch;
pub mod calendar;
pub mod config;
pub mod invoker;
pub mod parser;
pub mod report;

use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::Summary;
use crate::batch::BatchSummary;
use crate::config::BenchConfig;
use crate::invoker::ProcessInvoker;

/// Run the configured batch against the real simulator process.
///
/// Prints progress and the final report to stdout, and returns the summary.
/// With `json`, progress moves to stderr and stdout carries only the JSON summary.
pub fn run(config: &BenchConfig, json: bool) -> Result<BatchSummary> {
    let dates = config.date_range();
    let params = config.run_params();
    let paths = config.output_paths();
    let mut invoker = ProcessInvoker::new(
        config.simulator.program.clone(),
        config.simulator.prefix_args.clone(),
    );

    tracing::info!(program = %invoker.program(), "Initiating testing sequence");
    if !json {
        println!("Initiating testing sequence...");
    }

    let (agg, summary) = if json {
        batch::execute(&dates, &params, &mut invoker, &paths, &mut std::io::stderr())?
    } else {
        batch::execute(&dates, &params, &mut invoker, &paths, &mut std::io::stdout())?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::format_report(&agg));
    }
    Ok(summary)
}

/// Re-read the three result tables in `dir` and print their statistics.
pub fn summarize(config: &BenchConfig, dir: Option<&Path>) -> Result<()> {
    let mut output = config.output.clone();
    if let Some(dir) = dir {
        output.directory = dir.to_path_buf();
    }
    let config = BenchConfig {
        output,
        ..config.clone()
    };
    let paths = config.output_paths();

    for path in [&paths.times, &paths.sensors, &paths.battery] {
        let (name, values) = report::read_series(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let summary = Summary::from_values(&values);
        print!("{}", report::format_section(&name, &summary, &values));
    }
    Ok(())
}
