use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which rendering formatter chain is active for tabular output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Vanilla environment display, no custom formatters
    Plain,
    /// Classic simple-table display
    Simple,
    /// Enhanced grid display
    Enhanced,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::Simple
    }
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Plain => "plain",
            DisplayMode::Simple => "simple",
            DisplayMode::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(DisplayMode::Plain),
            "simple" => Ok(DisplayMode::Simple),
            "enhanced" => Ok(DisplayMode::Enhanced),
            _ => Err(Error::UnsupportedDisplayMode(s.to_string())),
        }
    }
}
