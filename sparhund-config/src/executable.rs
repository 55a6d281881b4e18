//! Executable stage parameters.
//!
//! The program and arguments are handed to the OS without sanitization
//! or escaping. Whoever writes this configuration owns that trust
//! decision.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExecutableConfig {
    /// Program spawned by the executable stage.
    #[validate(length(min = 1, message = "program must not be empty"))]
    pub program: String,

    /// Arguments passed through verbatim.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ExecutableConfig {
    fn default() -> Self {
        Self {
            program: "echo".to_string(),
            args: vec!["sparhund".to_string()],
        }
    }
}
