//! Simulator process wrapper -- spawn, wait, capture stdout.

use std::process::Command;
use std::time::Instant;

use tracing::debug;

use super::{InvokeError, Invocation, Invoker};

/// Runs the simulator as a child process, one blocking call per date.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: String,
    prefix_args: Vec<String>,
}

impl ProcessInvoker {
    /// `prefix_args` go before the positional date arguments (e.g. `-jar app.jar`).
    pub fn new(program: impl Into<String>, prefix_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(&mut self, args: &[String]) -> Result<Invocation, InvokeError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args);
        cmd.args(args);

        debug!(program = %self.program, ?args, "launching simulator");

        let started = Instant::now();
        let output = cmd.output().map_err(|source| InvokeError::Launch {
            program: self.program.clone(),
            source,
        })?;
        let elapsed = started.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            debug!(status = %output.status, "simulator exited unsuccessfully");
            return Err(InvokeError::Failed {
                status: output.status.to_string(),
                stdout,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(Invocation { stdout, elapsed })
    }
}
