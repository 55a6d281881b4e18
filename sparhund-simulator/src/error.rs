//! Error taxonomy for action units and orchestrated runs.
//!
//! No failure here is retried or suppressed. `NotFound` is the only
//! variant a caller is expected to recover from; everything else
//! aborts the run that produced it.

use std::fmt;
use std::io;
use std::path::PathBuf;

use sparhund_telemetry::IdentityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// Target of a modify/delete does not exist. Recoverable: retry
    /// with a valid reference or with no reference at all.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Transport or DNS failure while fetching the configured endpoint.
    #[error("network transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Could not determine the local egress address.
    #[error("local egress address lookup failed: {0}")]
    EgressLookup(#[from] local_ip_address::Error),

    /// The requested executable could not be launched.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The host could not report the acting user/process identity.
    #[error("identity lookup failed: {0}")]
    Identity(#[from] IdentityError),

    /// File-system failure outside the NotFound case.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The event log could not be encoded for persistence.
    #[error("event log serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Stages of an orchestrated run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CreateFile,
    ModifyFile,
    DeleteFile,
    RunExecutable,
    FetchData,
    PersistLog,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CreateFile => "create_file",
            Stage::ModifyFile => "modify_file",
            Stage::DeleteFile => "delete_file",
            Stage::RunExecutable => "run_executable",
            Stage::FetchData => "fetch_data",
            Stage::PersistLog => "persist_log",
        };
        f.write_str(name)
    }
}

/// An action-unit failure wrapped with the stage that hit it.
#[derive(Debug, Error)]
#[error("simulation stage '{stage}' failed: {source}")]
pub struct RunError {
    pub stage: Stage,
    #[source]
    pub source: SimulationError,
}
