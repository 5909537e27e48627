use std::fmt;

/// Result type for framelens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised by the settings layer
#[derive(Debug)]
pub enum Error {
    /// Field name not found in the declared settings schema
    UnknownSetting(String),
    /// Field value failed its validator's domain check
    InvalidValue {
        /// Canonical name of the rejected field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
    /// A renderable-type token could not be resolved against the registry
    UnresolvableType(String),
    /// Display mode outside the closed enumeration
    UnsupportedDisplayMode(String),
    /// Sampling method outside the closed enumeration
    UnsupportedSamplingMethod(String),
    /// Log level outside the known set
    UnsupportedLogLevel(String),
    /// Scoped-override restoration failed.
    ///
    /// Carries every restoration error plus the in-flight error from the
    /// scope body (if any), so a restore failure never masks the original.
    Restore {
        /// Errors raised while re-applying snapshot fields
        failed: Vec<Error>,
        /// The error that was propagating out of the scope body. `None`
        /// means the body ran to completion and only restoration failed;
        /// the body's return value is lost in that case.
        original: Option<Box<Error>>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSetting(name) => write!(f, "`{}` is not a valid setting", name),
            Error::InvalidValue { field, reason } => {
                write!(f, "invalid value for `{}`: {}", field, reason)
            }
            Error::UnresolvableType(token) => {
                write!(f, "`{}` is not a registered renderable type", token)
            }
            Error::UnsupportedDisplayMode(value) => {
                write!(f, "`{}` is not a supported display mode", value)
            }
            Error::UnsupportedSamplingMethod(value) => {
                write!(f, "`{}` is not a supported sampling method", value)
            }
            Error::UnsupportedLogLevel(value) => {
                write!(f, "`{}` is not a supported log level", value)
            }
            Error::Restore { failed, original } => {
                write!(f, "failed to restore {} setting(s) after scoped override", failed.len())?;
                if let Some(first) = failed.first() {
                    write!(f, ": {}", first)?;
                }
                match original {
                    Some(original) => write!(f, " (while handling: {})", original)?,
                    None => write!(f, " (scope body had completed)")?,
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Restore { original, failed } => match original {
                Some(err) => Some(err.as_ref()),
                None => failed.first().map(|err| err as _),
            },
            _ => None,
        }
    }
}
