//! The run-parse-aggregate loop.
//!
//! Strictly sequential: each date's invocation, parse and aggregation finish
//! before the next date starts, so observations land in chronological order.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::{Aggregator, FailureKind, Observation, Summary};
use crate::calendar::{DateRange, DateTuple};
use crate::invoker::{build_args, InvokeError, Invoker, RunParams};
use crate::parser::{parse_output, ParseOutcome, SENSOR_TOTAL};
use crate::report::{self, OutputPaths};

/// What one date contributed to the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    Observed(Observation),
    Failed(FailureKind),
}

/// Invoke, parse and record a single date.
///
/// Run failures are absorbed into `agg`; only a launch error is returned.
/// Progress (date, raw output, elapsed time) goes to `console`.
pub fn run_date<I: Invoker, W: Write>(
    date: &DateTuple,
    params: &RunParams,
    invoker: &mut I,
    agg: &mut Aggregator,
    console: &mut W,
) -> Result<RunResult, InvokeError> {
    let _ = writeln!(console, "\n{}", date);
    let args = build_args(date, params);

    let invocation = match invoker.invoke(&args) {
        Ok(inv) => inv,
        Err(e) if e.is_run_failure() => {
            let _ = writeln!(console, "{}", e);
            if let InvokeError::Failed { stdout, .. } = &e {
                if !stdout.trim().is_empty() {
                    let _ = writeln!(console, "{}", stdout.trim_end());
                }
            }
            warn!(date = %date, error = %e, "run failed");
            agg.record_failure(FailureKind::Invocation);
            return Ok(RunResult::Failed(FailureKind::Invocation));
        }
        Err(e) => return Err(e),
    };

    match parse_output(&invocation.stdout) {
        ParseOutcome::Parsed { sensors, battery } => {
            let obs = Observation {
                elapsed: invocation.elapsed,
                sensors,
                battery,
            };
            agg.record(obs);
            let _ = writeln!(console, "{}", invocation.stdout.trim_end());
            let _ = writeln!(console, "Time: {}", invocation.elapsed.as_secs_f64());
            info!(
                date = %date,
                elapsed_secs = invocation.elapsed.as_secs_f64(),
                sensors,
                battery,
                "run complete"
            );
            Ok(RunResult::Observed(obs))
        }
        ParseOutcome::Unparseable { raw } => {
            let _ = writeln!(console, "{}", raw.trim_end());
            let _ = writeln!(
                console,
                "Unparseable output (expected `<k>/{}` and `Battery: <n>`)",
                SENSOR_TOTAL
            );
            warn!(date = %date, "run output missing sensors or battery field");
            agg.record_failure(FailureKind::Unparseable);
            Ok(RunResult::Failed(FailureKind::Unparseable))
        }
    }
}

/// Run every date in `dates`, in order, into a fresh aggregator.
pub fn run_batch<I: Invoker, W: Write>(
    dates: &DateRange,
    params: &RunParams,
    invoker: &mut I,
    console: &mut W,
) -> Result<Aggregator, InvokeError> {
    let mut agg = Aggregator::new();
    for date in dates {
        run_date(&date, params, invoker, &mut agg, console)?;
    }
    Ok(agg)
}

/// Machine-readable outcome of a finished batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub runs: u64,
    pub failed: u64,
    pub invocation_failures: u64,
    pub unparseable: u64,
    pub series: SeriesSummaries,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummaries {
    pub times: Summary,
    pub sensors: Summary,
    pub battery: Summary,
}

impl BatchSummary {
    pub fn new(agg: &Aggregator, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at,
            runs: agg.len() as u64 + agg.failed(),
            failed: agg.failed(),
            invocation_failures: agg.invocation_failures(),
            unparseable: agg.unparseable(),
            series: SeriesSummaries {
                times: agg.times_summary(),
                sensors: agg.sensors_summary(),
                battery: agg.battery_summary(),
            },
        }
    }
}

/// Run the batch end to end: enumerate, invoke, aggregate, then write the
/// tables. Files are only written once the whole loop has finished.
///
/// Per-run progress and the final failure tally go to `console`.
pub fn execute<I: Invoker, W: Write>(
    dates: &DateRange,
    params: &RunParams,
    invoker: &mut I,
    paths: &OutputPaths,
    console: &mut W,
) -> Result<(Aggregator, BatchSummary)> {
    let started_at = Utc::now();
    info!(years = ?dates.years(), "starting batch");

    let agg = run_batch(dates, params, invoker, console).context("batch aborted")?;
    let finished_at = Utc::now();

    let failed_line = if agg.unparseable() > 0 {
        format!(
            "Testing finished...{} failed ({} exited non-zero, {} unparseable)",
            agg.failed(),
            agg.invocation_failures(),
            agg.unparseable()
        )
    } else {
        format!("Testing finished...{} failed", agg.failed())
    };
    let _ = writeln!(console, "{}", failed_line);

    report::write_tables(&agg, paths).context("failed to write result tables")?;

    let summary = BatchSummary::new(&agg, started_at, finished_at);
    Ok((agg, summary))
}
