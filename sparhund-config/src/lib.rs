//! # Sparhund Configuration System
//!
//! Hierarchical configuration for the activity simulator.
//!
//! ## Features
//! - **Unified Configuration**: one source of truth for every stage
//! - **Validation**: runtime validation of critical parameters
//! - **Environment Awareness**: `SPARHUND_*` variables override files

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod executable;
mod network;
mod report;
mod scratch;

pub use error::ConfigError;
pub use executable::ExecutableConfig;
pub use network::NetworkConfig;
pub use report::ReportConfig;
pub use scratch::ScratchConfig;

/// Top-level configuration container for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct SimulationConfig {
    /// Scratch file parameters (create/modify/delete stages).
    #[validate(nested)]
    #[serde(default)]
    pub scratch: ScratchConfig,

    /// Outbound fetch parameters.
    #[validate(nested)]
    #[serde(default)]
    pub network: NetworkConfig,

    /// Subprocess stage parameters.
    #[validate(nested)]
    #[serde(default)]
    pub executable: ExecutableConfig,

    /// Persisted artifact parameters.
    #[validate(nested)]
    #[serde(default)]
    pub report: ReportConfig,
}

impl SimulationConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/sparhund.yaml`, when present
    /// 3. `SPARHUND_*` environment variables (`__` separates nesting)
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(SimulationConfig::default()));

        if Path::new("config/sparhund.yaml").exists() {
            figment = figment.merge(Yaml::file("config/sparhund.yaml"));
        }

        figment
            .merge(Env::prefixed("SPARHUND_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path, failing when the file
    /// is missing instead of falling back to defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Figment::from(Serialized::defaults(SimulationConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SPARHUND_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
