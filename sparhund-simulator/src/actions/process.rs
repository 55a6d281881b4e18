//! Executable action unit: spawn, log, wait.

use std::process::{Command, ExitStatus};

use tracing::info;

use sparhund_telemetry::{EventPayload, EventRecord, ExecutablePayload};

use crate::error::SimulationError;
use crate::SimulationRun;

impl SimulationRun {
    /// Spawns the executable with the given arguments, logs one
    /// executable event, and blocks until the child exits.
    ///
    /// VERY DANGEROUS: the executable and arguments pass through to
    /// process creation without validation or escaping. Callers are
    /// fully responsible for trusting this input.
    pub fn run_executable(
        &mut self,
        executable: &str,
        args: &[String],
    ) -> Result<ExitStatus, SimulationError> {
        let command = std::iter::once(executable)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        let mut child = Command::new(executable)
            .args(args)
            .spawn()
            .map_err(|source| SimulationError::Spawn {
                command: command.clone(),
                source,
            })?;

        let record = EventRecord::new(EventPayload::Executable(ExecutablePayload {
            process_id: child.id(),
            process_name: executable.to_string(),
            command,
        }))?;
        self.store_mut().append(record);

        let status = child.wait()?;
        info!(executable, %status, "child process exited");
        Ok(status)
    }
}
