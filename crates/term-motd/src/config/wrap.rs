//! Line wrapping configuration.

use ansi_wrap::{AnsiWrapper, DEFAULT_MATCH_WINDOW};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Line wrapping configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WrapConfig {
    /// Maximum number of visible characters per line (0 disables wrapping).
    pub width: usize,
    /// Number of characters matched between wrapped and escaped text.
    #[schemars(range(min = 1))]
    pub match_window: usize,
    /// Allow breaking lines after hyphens of compound words.
    pub break_on_hyphens: bool,
}

impl Default for WrapConfig {
    fn default() -> Self {
        WrapConfig {
            width: 80,
            match_window: DEFAULT_MATCH_WINDOW,
            break_on_hyphens: true,
        }
    }
}

impl WrapConfig {
    /// Build the wrapper described by this configuration.
    pub fn wrapper(&self) -> AnsiWrapper {
        AnsiWrapper::new(self.width)
            .with_match_window(self.match_window)
            .with_break_on_hyphens(self.break_on_hyphens)
    }
}
