use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Strategy for reducing an oversized dataset to fit render limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMethod {
    /// Seeded random sample
    Random,
    /// Keep the leading values
    First,
    /// Keep the trailing values
    Last,
    /// Keep a centered slice
    Inner,
    /// Keep the leading and trailing halves, dropping the middle
    Outer,
}

impl Default for SamplingMethod {
    fn default() -> Self {
        Self::Random
    }
}

impl SamplingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingMethod::Random => "random",
            SamplingMethod::First => "first",
            SamplingMethod::Last => "last",
            SamplingMethod::Inner => "inner",
            SamplingMethod::Outer => "outer",
        }
    }
}

impl fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplingMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(SamplingMethod::Random),
            "first" => Ok(SamplingMethod::First),
            "last" => Ok(SamplingMethod::Last),
            "inner" => Ok(SamplingMethod::Inner),
            "outer" => Ok(SamplingMethod::Outer),
            _ => Err(Error::UnsupportedSamplingMethod(s.to_string())),
        }
    }
}
