//! MOTD layout configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MOTD layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MotdConfig {
    /// Prefix added to every non-blank line (default: two spaces).
    pub indent: String,
    /// Line printed above the extra link.
    pub link_header: String,
}

impl Default for MotdConfig {
    fn default() -> Self {
        MotdConfig {
            indent: "  ".to_string(),
            link_header: "More information in".to_string(),
        }
    }
}
