//! TOML configuration for a benchmark batch.
//!
//! Every field has a compiled-in default, so an empty file (or no file at all)
//! reproduces the standard 2020-2021 sweep against the packaged simulator jar.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calendar::{CalendarTable, DateRange};
use crate::invoker::RunParams;
use crate::report::OutputPaths;

/// Environment variable naming a config file to load when none is given.
pub const CONFIG_ENV: &str = "SIMBENCH_CONFIG";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for one batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub dates: DatesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl BenchConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        info!(path = %path.display(), "loaded benchmark configuration");
        Ok(config)
    }

    /// Resolve configuration, in order:
    /// 1. `explicit` (a failure here is an error).
    /// 2. The path in `SIMBENCH_CONFIG` (a failure here falls through with a warning).
    /// 3. Compiled-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let path = Path::new(&env_path);
            match Self::load(path) {
                Ok(cfg) => return Ok(cfg),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "SIMBENCH_CONFIG set but file could not be loaded, using defaults"
                    );
                }
            }
        }

        debug!("no config file given, using compiled-in defaults");
        Ok(Self::default())
    }

    pub fn run_params(&self) -> RunParams {
        RunParams {
            start_latitude: self.simulator.start_latitude.clone(),
            start_longitude: self.simulator.start_longitude.clone(),
            param1: self.simulator.param1.clone(),
            param2: self.simulator.param2.clone(),
        }
    }

    /// Date range for the configured years.
    ///
    /// The reference years use the fixed tables; any other year gets a
    /// Gregorian-derived table.
    pub fn date_range(&self) -> DateRange {
        let table = CalendarTable::covering(&self.dates.years);

        for year in &self.dates.years {
            if !table.contains(*year) {
                warn!(year = *year, "year has no calendar table, skipping");
            }
        }

        DateRange::new(table, &self.dates.years, self.dates.exclude_last_day)
    }

    pub fn output_paths(&self) -> OutputPaths {
        let dir = &self.output.directory;
        OutputPaths {
            times: dir.join(&self.output.times_file),
            sensors: dir.join(&self.output.sensors_file),
            battery: dir.join(&self.output.battery_file),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// How to launch the simulator and the fixed values passed on every run.
///
/// Coordinates and parameters are passed through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Executable to run.
    pub program: String,
    /// Arguments placed before the positional date arguments.
    pub prefix_args: Vec<String>,
    pub start_latitude: String,
    pub start_longitude: String,
    pub param1: String,
    pub param2: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            prefix_args: vec![
                "-jar".to_string(),
                "../aqmaps/target/aqmaps-0.0.1-SNAPSHOT.jar".to_string(),
            ],
            start_latitude: "55.944425".to_string(),
            start_longitude: "-3.188396".to_string(),
            param1: "5678".to_string(),
            param2: "9898".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatesConfig {
    pub years: Vec<i32>,
    /// Skip the last day of every month, matching the legacy sweep.
    pub exclude_last_day: bool,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            years: vec![2020, 2021],
            exclude_last_day: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub times_file: String,
    pub sensors_file: String,
    pub battery_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            times_file: "times.csv".to_string(),
            sensors_file: "sensors.csv".to_string(),
            battery_file: "battery.csv".to_string(),
        }
    }
}
