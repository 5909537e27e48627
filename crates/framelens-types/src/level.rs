use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Verbosity of the process-wide logger for this package's namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Warn
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Map the numeric levels used by notebook logging frameworks
    /// (0/10/20/30/40/50) onto the named levels.
    pub fn from_numeric(level: i64) -> Result<Self, Error> {
        match level {
            0 => Ok(LogLevel::Trace),
            10 => Ok(LogLevel::Debug),
            20 => Ok(LogLevel::Info),
            30 => Ok(LogLevel::Warn),
            40 | 50 => Ok(LogLevel::Error),
            _ => Err(Error::UnsupportedLogLevel(level.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "critical" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(Error::UnsupportedLogLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_level_aliases() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("critical".parse::<LogLevel>().unwrap(), LogLevel::Error);
    }

    #[test]
    fn test_from_numeric_levels() {
        assert_eq!(LogLevel::from_numeric(10).unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_numeric(30).unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_numeric(50).unwrap(), LogLevel::Error);
        assert!(LogLevel::from_numeric(35).is_err());
    }
}
