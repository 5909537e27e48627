use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::field::SettingField;
use crate::level::LogLevel;
use crate::mode::DisplayMode;
use crate::renderable::RenderableType;
use crate::sampling::SamplingMethod;

/// Dynamic value accepted by the option setter.
///
/// Callers can pass native values (integers, booleans, enums) or strings;
/// string inputs are coerced to the field's declared type at validation
/// time.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Mode(DisplayMode),
    Sampling(SamplingMethod),
    Level(LogLevel),
    Types(BTreeSet<RenderableType>),
}

impl SettingValue {
    /// Human-readable kind, used in validation error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Int(_) => "integer",
            SettingValue::Float(_) => "float",
            SettingValue::Bool(_) => "boolean",
            SettingValue::Str(_) => "string",
            SettingValue::Mode(_) => "display mode",
            SettingValue::Sampling(_) => "sampling method",
            SettingValue::Level(_) => "log level",
            SettingValue::Types(_) => "renderable type set",
        }
    }

    /// Parse a raw string (environment variable or user input) into the
    /// value shape the given field expects.
    pub fn parse_for(field: SettingField, raw: &str) -> Result<SettingValue> {
        let raw = raw.trim();
        match field {
            SettingField::DisplayMode => Ok(SettingValue::Mode(raw.parse()?)),
            SettingField::SamplingMethod
            | SettingField::ColumnSamplingMethod
            | SettingField::RowSamplingMethod => Ok(SettingValue::Sampling(raw.parse()?)),
            SettingField::LogLevel => {
                let level = match raw.parse::<i64>() {
                    Ok(numeric) => LogLevel::from_numeric(numeric)?,
                    Err(_) => raw.parse()?,
                };
                Ok(SettingValue::Level(level))
            }
            SettingField::RenderableTypes => {
                Ok(SettingValue::Types(RenderableType::resolve_list(raw)?))
            }
            SettingField::SamplingFactor => {
                let value: f64 = raw.parse().map_err(|_| Error::InvalidValue {
                    field: field.as_str(),
                    reason: format!("`{}` is not a valid float", raw),
                })?;
                Ok(SettingValue::Float(value))
            }
            SettingField::DisplayMaxRows
            | SettingField::DisplayMaxColumns
            | SettingField::MaxRenderSizeBytes
            | SettingField::SamplingSeed => {
                let value: i64 = raw.parse().map_err(|_| Error::InvalidValue {
                    field: field.as_str(),
                    reason: format!("`{}` is not a valid integer", raw),
                })?;
                Ok(SettingValue::Int(value))
            }
            SettingField::HtmlTableSchema
            | SettingField::ResetIndexValues
            | SettingField::FlattenIndexValues
            | SettingField::FlattenColumnValues
            | SettingField::StringifyIndexValues
            | SettingField::StringifyColumnValues
            | SettingField::EnableTracking => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(SettingValue::Bool(true)),
                "false" | "0" | "no" => Ok(SettingValue::Bool(false)),
                _ => Err(Error::InvalidValue {
                    field: field.as_str(),
                    reason: format!("`{}` is not a valid boolean", raw),
                }),
            },
            SettingField::MediaType | SettingField::DatetimeStringFormat => {
                Ok(SettingValue::Str(raw.to_string()))
            }
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Int(v) => write!(f, "{}", v),
            SettingValue::Float(v) => write!(f, "{}", v),
            SettingValue::Bool(v) => write!(f, "{}", v),
            SettingValue::Str(v) => f.write_str(v),
            SettingValue::Mode(v) => f.write_str(v.as_str()),
            SettingValue::Sampling(v) => f.write_str(v.as_str()),
            SettingValue::Level(v) => f.write_str(v.as_str()),
            SettingValue::Types(types) => {
                let names: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Int(value.into())
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::Int(value.into())
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl From<DisplayMode> for SettingValue {
    fn from(value: DisplayMode) -> Self {
        SettingValue::Mode(value)
    }
}

impl From<SamplingMethod> for SettingValue {
    fn from(value: SamplingMethod) -> Self {
        SettingValue::Sampling(value)
    }
}

impl From<LogLevel> for SettingValue {
    fn from(value: LogLevel) -> Self {
        SettingValue::Level(value)
    }
}

impl From<RenderableType> for SettingValue {
    fn from(value: RenderableType) -> Self {
        SettingValue::Types([value].into_iter().collect())
    }
}

impl From<BTreeSet<RenderableType>> for SettingValue {
    fn from(value: BTreeSet<RenderableType>) -> Self {
        SettingValue::Types(value)
    }
}

impl From<Vec<RenderableType>> for SettingValue {
    fn from(value: Vec<RenderableType>) -> Self {
        SettingValue::Types(value.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_for_coerces_enum_fields() {
        let value = SettingValue::parse_for(SettingField::DisplayMode, "enhanced").unwrap();
        assert_eq!(value, SettingValue::Mode(DisplayMode::Enhanced));

        let value = SettingValue::parse_for(SettingField::RowSamplingMethod, "outer").unwrap();
        assert_eq!(value, SettingValue::Sampling(SamplingMethod::Outer));
    }

    #[test]
    fn test_parse_for_accepts_numeric_log_levels() {
        let value = SettingValue::parse_for(SettingField::LogLevel, "10").unwrap();
        assert_eq!(value, SettingValue::Level(LogLevel::Debug));

        let value = SettingValue::parse_for(SettingField::LogLevel, "info").unwrap();
        assert_eq!(value, SettingValue::Level(LogLevel::Info));
    }

    #[test]
    fn test_parse_for_rejects_malformed_integers() {
        let err = SettingValue::parse_for(SettingField::DisplayMaxRows, "lots").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field, .. } if field == "display_max_rows"));
    }

    #[test]
    fn test_parse_for_resolves_renderable_lists() {
        let value = SettingValue::parse_for(SettingField::RenderableTypes, "int,str").unwrap();
        let SettingValue::Types(types) = value else {
            panic!("expected a type set");
        };
        assert_eq!(types.len(), 2);
    }
}
