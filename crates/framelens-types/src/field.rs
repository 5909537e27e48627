use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The declared settings schema: every configurable field, in declaration
/// order. Declaration order is also snapshot/restore order for scoped
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    LogLevel,
    DisplayMaxRows,
    DisplayMaxColumns,
    HtmlTableSchema,
    MediaType,
    MaxRenderSizeBytes,
    RenderableTypes,
    SamplingFactor,
    DisplayMode,
    SamplingMethod,
    ColumnSamplingMethod,
    RowSamplingMethod,
    SamplingSeed,
    ResetIndexValues,
    FlattenIndexValues,
    FlattenColumnValues,
    StringifyIndexValues,
    StringifyColumnValues,
    DatetimeStringFormat,
    EnableTracking,
}

impl SettingField {
    /// All declared fields in declaration order.
    pub const ALL: [SettingField; 20] = [
        SettingField::LogLevel,
        SettingField::DisplayMaxRows,
        SettingField::DisplayMaxColumns,
        SettingField::HtmlTableSchema,
        SettingField::MediaType,
        SettingField::MaxRenderSizeBytes,
        SettingField::RenderableTypes,
        SettingField::SamplingFactor,
        SettingField::DisplayMode,
        SettingField::SamplingMethod,
        SettingField::ColumnSamplingMethod,
        SettingField::RowSamplingMethod,
        SettingField::SamplingSeed,
        SettingField::ResetIndexValues,
        SettingField::FlattenIndexValues,
        SettingField::FlattenColumnValues,
        SettingField::StringifyIndexValues,
        SettingField::StringifyColumnValues,
        SettingField::DatetimeStringFormat,
        SettingField::EnableTracking,
    ];

    /// Canonical field name (lower snake case)
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingField::LogLevel => "log_level",
            SettingField::DisplayMaxRows => "display_max_rows",
            SettingField::DisplayMaxColumns => "display_max_columns",
            SettingField::HtmlTableSchema => "html_table_schema",
            SettingField::MediaType => "media_type",
            SettingField::MaxRenderSizeBytes => "max_render_size_bytes",
            SettingField::RenderableTypes => "renderable_types",
            SettingField::SamplingFactor => "sampling_factor",
            SettingField::DisplayMode => "display_mode",
            SettingField::SamplingMethod => "sampling_method",
            SettingField::ColumnSamplingMethod => "column_sampling_method",
            SettingField::RowSamplingMethod => "row_sampling_method",
            SettingField::SamplingSeed => "sampling_seed",
            SettingField::ResetIndexValues => "reset_index_values",
            SettingField::FlattenIndexValues => "flatten_index_values",
            SettingField::FlattenColumnValues => "flatten_column_values",
            SettingField::StringifyIndexValues => "stringify_index_values",
            SettingField::StringifyColumnValues => "stringify_column_values",
            SettingField::DatetimeStringFormat => "datetime_string_format",
            SettingField::EnableTracking => "enable_tracking",
        }
    }

    /// Resolve a user-supplied field name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == lowered)
            .ok_or_else(|| Error::UnknownSetting(name.to_string()))
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
