//! Run invoker: argument construction and the process boundary.

pub mod process;

use std::time::Duration;

use thiserror::Error;

use crate::calendar::DateTuple;

pub use process::ProcessInvoker;

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("simulator exited with {status}: {stderr}")]
    Failed {
        status: String,
        stdout: String,
        stderr: String,
    },
}

impl InvokeError {
    /// True when the run itself failed, as opposed to the harness being unable to start it.
    pub fn is_run_failure(&self) -> bool {
        matches!(self, InvokeError::Failed { .. })
    }
}

/// Fixed identity parameters shared by every run of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    pub start_latitude: String,
    pub start_longitude: String,
    pub param1: String,
    pub param2: String,
}

/// Positional argument vector for one date:
/// `[DD, MM, YYYY, startLat, startLng, param1, param2]`.
pub fn build_args(date: &DateTuple, params: &RunParams) -> Vec<String> {
    vec![
        format!("{:02}", date.day),
        format!("{:02}", date.month),
        format!("{:04}", date.year),
        params.start_latitude.clone(),
        params.start_longitude.clone(),
        params.param1.clone(),
        params.param2.clone(),
    ]
}

/// Captured result of a successful invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub stdout: String,
    pub elapsed: Duration,
}

/// Seam between the batch driver and the external simulator.
///
/// Implementations block until the run is finished.
pub trait Invoker {
    fn invoke(&mut self, args: &[String]) -> Result<Invocation, InvokeError>;
}
