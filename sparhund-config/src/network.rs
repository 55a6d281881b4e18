//! Network fetch stage parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NetworkConfig {
    /// Endpoint fetched by the network stage.
    #[validate(url(message = "endpoint must be a valid URL"))]
    pub endpoint: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://example.com".to_string(),
        }
    }
}
