//! Persisted event-log artifact parameters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportConfig {
    /// Directory receiving `simulation_<run_id>.json` artifacts.
    pub directory: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("simulation_logs"),
        }
    }
}
