//! Scratch file parameters for the file action stages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where and how the simulator creates its scratch files.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScratchConfig {
    /// Directory for generated files. Created on demand.
    pub directory: PathBuf,

    /// Extension for generated files, without the leading dot.
    #[validate(length(min = 1, message = "extension must not be empty"))]
    pub extension: String,

    /// Explicit target for the modify stage. When absent, the stage
    /// synthesizes a fresh file first.
    #[serde(default)]
    pub modify_target: Option<PathBuf>,

    /// Explicit target for the delete stage. Same fallback as modify.
    #[serde(default)]
    pub delete_target: Option<PathBuf>,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            directory: std::env::temp_dir().join("sparhund"),
            extension: "txt".to_string(),
            modify_target: None,
            delete_target: None,
        }
    }
}
