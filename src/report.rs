//! Result tables (CSV) and console formatting.

use std::fmt::{Display, Write as _};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::analysis::{Aggregator, Summary};

pub const TIMES: &str = "Times";
pub const SENSORS: &str = "Sensors";
pub const BATTERY: &str = "Battery";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed table {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Where the three tables are written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub times: PathBuf,
    pub sensors: PathBuf,
    pub battery: PathBuf,
}

/// Write one series as an index/value table with a `,<name>` header.
///
/// Any existing file at `path` is overwritten.
pub fn write_series<T: Display>(path: &Path, name: &str, values: &[T]) -> Result<(), ReportError> {
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(["", name]).map_err(csv_err)?;
    for (i, v) in values.iter().enumerate() {
        writer
            .write_record([i.to_string(), v.to_string()])
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Write all three series. Creates the parent directories if needed.
pub fn write_tables(agg: &Aggregator, paths: &OutputPaths) -> Result<(), ReportError> {
    for path in [&paths.times, &paths.sensors, &paths.battery] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ReportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    write_series(&paths.times, TIMES, agg.times())?;
    write_series(&paths.sensors, SENSORS, agg.sensors())?;
    write_series(&paths.battery, BATTERY, agg.battery())?;
    info!(rows = agg.len(), times = %paths.times.display(), "result tables written");
    Ok(())
}

/// Read a table written by [`write_series`] back into (name, values).
pub fn read_series(path: &Path) -> Result<(String, Vec<f64>), ReportError> {
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let malformed = |reason: String| ReportError::Malformed {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let name = reader
        .headers()
        .map_err(csv_err)?
        .get(1)
        .ok_or_else(|| malformed("missing series header".to_string()))?
        .to_string();

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let raw = record
            .get(1)
            .ok_or_else(|| malformed(format!("row {row} has no value column")))?;
        let value = raw
            .parse::<f64>()
            .map_err(|e| malformed(format!("row {row}: {e}")))?;
        values.push(value);
    }
    Ok((name, values))
}

fn fmt_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", v)
    }
}

/// Describe block: count, mean, std, min, quartiles, max.
pub fn format_summary(summary: &Summary) -> String {
    let mut out = String::new();
    for (label, value) in summary.rows() {
        let value = if label == "count" {
            summary.count.to_string()
        } else {
            fmt_stat(value)
        };
        let _ = writeln!(out, "{:<6} {:>14}", label, value);
    }
    out
}

/// Raw series dump: one `index value` line per observation.
pub fn format_series<T: Display>(name: &str, values: &[T]) -> String {
    let mut out = String::new();
    for (i, v) in values.iter().enumerate() {
        let _ = writeln!(out, "{:<6} {}", i, v);
    }
    let _ = writeln!(out, "Name: {}, Length: {}", name, values.len());
    out
}

/// Heading, describe block and raw dump for one series.
pub fn format_section<T: Display>(name: &str, summary: &Summary, values: &[T]) -> String {
    format!(
        "\n\n{}\n{}{}",
        name,
        format_summary(summary),
        format_series(name, values)
    )
}

/// Console report for the whole batch, in Times, Sensors, Battery order.
pub fn format_report(agg: &Aggregator) -> String {
    let mut out = String::new();
    out.push_str(&format_section(TIMES, &agg.times_summary(), agg.times()));
    out.push_str(&format_section(SENSORS, &agg.sensors_summary(), agg.sensors()));
    out.push_str(&format_section(BATTERY, &agg.battery_summary(), agg.battery()));
    out
}
