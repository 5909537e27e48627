use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A value type eligible for the custom rendering pipeline.
///
/// The registry is a closed set: tokens are resolved against the known
/// names below and anything unregistered is rejected, rather than
/// evaluating arbitrary input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderableType {
    /// Two-dimensional tabular container
    DataFrame,
    /// One-dimensional labeled container
    Series,
    /// N-dimensional numeric array
    Ndarray,
    Int,
    Float,
    Str,
    Bool,
    /// Timezone-aware or naive timestamps
    Datetime,
    /// Time deltas / durations
    Timedelta,
    /// Time periods (spans with a frequency)
    Period,
    /// Geometry values (points, shapes)
    Geometry,
}

impl RenderableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderableType::DataFrame => "dataframe",
            RenderableType::Series => "series",
            RenderableType::Ndarray => "ndarray",
            RenderableType::Int => "int",
            RenderableType::Float => "float",
            RenderableType::Str => "str",
            RenderableType::Bool => "bool",
            RenderableType::Datetime => "datetime",
            RenderableType::Timedelta => "timedelta",
            RenderableType::Period => "period",
            RenderableType::Geometry => "geometry",
        }
    }

    /// Container types the formatter accepts out of the box.
    pub fn default_set() -> BTreeSet<RenderableType> {
        [
            RenderableType::DataFrame,
            RenderableType::Series,
            RenderableType::Ndarray,
        ]
        .into_iter()
        .collect()
    }

    /// Resolve a single token against the registry.
    pub fn resolve(token: &str) -> Result<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "dataframe" => Ok(RenderableType::DataFrame),
            "series" => Ok(RenderableType::Series),
            "ndarray" => Ok(RenderableType::Ndarray),
            "int" => Ok(RenderableType::Int),
            "float" => Ok(RenderableType::Float),
            "str" => Ok(RenderableType::Str),
            "bool" => Ok(RenderableType::Bool),
            "datetime" => Ok(RenderableType::Datetime),
            "timedelta" => Ok(RenderableType::Timedelta),
            "period" => Ok(RenderableType::Period),
            "geometry" => Ok(RenderableType::Geometry),
            _ => Err(Error::UnresolvableType(token.trim().to_string())),
        }
    }

    /// Resolve a comma- or whitespace-separated list of tokens.
    pub fn resolve_list(input: &str) -> Result<BTreeSet<Self>> {
        let mut types = BTreeSet::new();
        for token in input.split([',', ' ']).filter(|t| !t.trim().is_empty()) {
            types.insert(Self::resolve(token)?);
        }
        Ok(types)
    }
}

impl fmt::Display for RenderableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_list_accepts_comma_separated_tokens() {
        let types = RenderableType::resolve_list("int, str").unwrap();
        assert_eq!(
            types,
            [RenderableType::Int, RenderableType::Str].into_iter().collect()
        );
    }

    #[test]
    fn test_resolve_names_the_offending_token() {
        let err = RenderableType::resolve_list("int, widget").unwrap_err();
        assert!(matches!(err, Error::UnresolvableType(token) if token == "widget"));
    }

    #[test]
    fn test_default_set_holds_container_types() {
        let defaults = RenderableType::default_set();
        assert!(defaults.contains(&RenderableType::DataFrame));
        assert!(defaults.contains(&RenderableType::Series));
        assert!(defaults.contains(&RenderableType::Ndarray));
        assert_eq!(defaults.len(), 3);
    }
}
