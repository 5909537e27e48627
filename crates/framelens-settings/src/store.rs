use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use framelens_types::{
    DisplayMode, Error, LogLevel, RenderableType, Result, SamplingMethod, SettingField,
    SettingValue,
};

use crate::engine::{EngineOption, EngineOptionValue, EngineOptions};

const MB: u64 = 1024 * 1024;

/// Prefix for environment-sourced overrides (`FRAMELENS_DISPLAY_MAX_ROWS`,
/// `FRAMELENS_DISPLAY_MODE`, ...), consumed once at construction.
pub const ENV_PREFIX: &str = "FRAMELENS_";

/// Validated configuration store.
///
/// Fields are private: every write flows through [`SettingsStore::assign`],
/// which runs the field's validator before storing. Validators for the
/// display-geometry fields also push the validated value into the external
/// engine's matching option. On validation failure the field keeps its
/// prior value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsStore {
    log_level: LogLevel,
    display_max_rows: u64,
    display_max_columns: u64,
    html_table_schema: bool,
    media_type: String,
    max_render_size_bytes: u64,
    renderable_types: BTreeSet<RenderableType>,
    sampling_factor: f64,
    display_mode: DisplayMode,
    sampling_method: SamplingMethod,
    column_sampling_method: SamplingMethod,
    row_sampling_method: SamplingMethod,
    sampling_seed: u64,
    reset_index_values: bool,
    flatten_index_values: bool,
    flatten_column_values: bool,
    stringify_index_values: bool,
    stringify_column_values: bool,
    datetime_string_format: String,
    enable_tracking: bool,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            display_max_rows: 60,
            display_max_columns: 20,
            html_table_schema: false,
            media_type: "application/vnd.dataresource+json".to_string(),
            max_render_size_bytes: 100 * MB,
            renderable_types: RenderableType::default_set(),
            sampling_factor: 0.1,
            display_mode: DisplayMode::Simple,
            sampling_method: SamplingMethod::Random,
            column_sampling_method: SamplingMethod::Random,
            row_sampling_method: SamplingMethod::Random,
            sampling_seed: 12_648_430,
            reset_index_values: false,
            flatten_index_values: false,
            flatten_column_values: false,
            stringify_index_values: false,
            stringify_column_values: false,
            datetime_string_format: "%Y-%m-%dT%H:%M:%S.%f".to_string(),
            enable_tracking: false,
        }
    }
}

impl SettingsStore {
    /// Build a store from defaults, mirroring the display-geometry fields
    /// into the engine's option store.
    pub fn new(engine: &mut dyn EngineOptions) -> Self {
        let store = Self::default();
        store.push_engine_mirrors(engine);
        store
    }

    /// Build a store from defaults overlaid with `FRAMELENS_*` environment
    /// variables. Each override flows through the normal validator path.
    pub fn from_env(engine: &mut dyn EngineOptions) -> Result<Self> {
        Self::from_env_vars(std::env::vars(), engine)
    }

    /// Build a store from defaults overlaid with `FRAMELENS_*` entries in
    /// the given variable set. Variables without the prefix (or naming no
    /// declared field) are ignored; matches apply in field declaration
    /// order through the normal validator path.
    pub fn from_env_vars(
        vars: impl IntoIterator<Item = (String, String)>,
        engine: &mut dyn EngineOptions,
    ) -> Result<Self> {
        let vars: BTreeMap<String, String> = vars.into_iter().collect();
        let mut pairs = Vec::new();
        for field in SettingField::ALL {
            let var = format!("{}{}", ENV_PREFIX, field.as_str().to_ascii_uppercase());
            if let Some(raw) = vars.get(&var) {
                pairs.push((field.as_str().to_string(), SettingValue::parse_for(field, raw)?));
            }
        }
        Self::from_overrides(pairs, engine)
    }

    /// Build a store from defaults overlaid with explicit construction-time
    /// overrides, keyed by case-insensitive field name.
    pub fn from_overrides(
        overrides: impl IntoIterator<Item = (String, SettingValue)>,
        engine: &mut dyn EngineOptions,
    ) -> Result<Self> {
        let mut store = Self::new(engine);
        for (name, value) in overrides {
            let field = SettingField::from_name(&name)?;
            store.assign(field, value, engine)?;
        }
        Ok(store)
    }

    /// Assign `value` to `field`, running the field's validator first.
    ///
    /// String inputs are coerced to the field's declared type. The
    /// display-geometry validators push the validated value into the
    /// engine's option store as a side effect.
    pub fn assign(
        &mut self,
        field: SettingField,
        value: SettingValue,
        engine: &mut dyn EngineOptions,
    ) -> Result<()> {
        // Only the two free-text fields take strings verbatim; for every
        // other field a string is coerced through the field-aware parser.
        let value = match (field, value) {
            (SettingField::MediaType | SettingField::DatetimeStringFormat, value) => value,
            (field, SettingValue::Str(raw)) => SettingValue::parse_for(field, &raw)?,
            (_, value) => value,
        };

        match field {
            SettingField::LogLevel => self.log_level = expect_level(field, value)?,
            SettingField::DisplayMaxRows => {
                let rows = expect_non_negative(field, value)?;
                self.display_max_rows = rows;
                engine.set(EngineOption::MaxRows, EngineOptionValue::Limit(rows));
            }
            SettingField::DisplayMaxColumns => {
                let columns = expect_non_negative(field, value)?;
                self.display_max_columns = columns;
                engine.set(EngineOption::MaxColumns, EngineOptionValue::Limit(columns));
            }
            SettingField::HtmlTableSchema => {
                let enabled = expect_bool(field, value)?;
                self.html_table_schema = enabled;
                engine.set(EngineOption::TableSchema, EngineOptionValue::Flag(enabled));
            }
            SettingField::MediaType => self.media_type = expect_string(field, value)?,
            SettingField::MaxRenderSizeBytes => {
                self.max_render_size_bytes = expect_non_negative(field, value)?;
            }
            SettingField::RenderableTypes => self.renderable_types = expect_types(field, value)?,
            SettingField::SamplingFactor => {
                let factor = expect_float(field, value)?;
                if !(0.0..=1.0).contains(&factor) {
                    return Err(Error::InvalidValue {
                        field: field.as_str(),
                        reason: format!("{} is not within [0, 1]", factor),
                    });
                }
                self.sampling_factor = factor;
            }
            SettingField::DisplayMode => self.display_mode = expect_mode(field, value)?,
            SettingField::SamplingMethod => self.sampling_method = expect_sampling(field, value)?,
            SettingField::ColumnSamplingMethod => {
                self.column_sampling_method = expect_sampling(field, value)?;
            }
            SettingField::RowSamplingMethod => {
                self.row_sampling_method = expect_sampling(field, value)?;
            }
            SettingField::SamplingSeed => self.sampling_seed = expect_non_negative(field, value)?,
            SettingField::ResetIndexValues => self.reset_index_values = expect_bool(field, value)?,
            SettingField::FlattenIndexValues => {
                self.flatten_index_values = expect_bool(field, value)?;
            }
            SettingField::FlattenColumnValues => {
                self.flatten_column_values = expect_bool(field, value)?;
            }
            SettingField::StringifyIndexValues => {
                self.stringify_index_values = expect_bool(field, value)?;
            }
            SettingField::StringifyColumnValues => {
                self.stringify_column_values = expect_bool(field, value)?;
            }
            SettingField::DatetimeStringFormat => {
                self.datetime_string_format = expect_string(field, value)?;
            }
            SettingField::EnableTracking => self.enable_tracking = expect_bool(field, value)?,
        }

        debug!(field = %field, "stored validated setting");
        Ok(())
    }

    /// Read a field's current value as a dynamic [`SettingValue`].
    pub fn get(&self, field: SettingField) -> SettingValue {
        match field {
            SettingField::LogLevel => SettingValue::Level(self.log_level),
            SettingField::DisplayMaxRows => SettingValue::Int(self.display_max_rows as i64),
            SettingField::DisplayMaxColumns => SettingValue::Int(self.display_max_columns as i64),
            SettingField::HtmlTableSchema => SettingValue::Bool(self.html_table_schema),
            SettingField::MediaType => SettingValue::Str(self.media_type.clone()),
            SettingField::MaxRenderSizeBytes => {
                SettingValue::Int(self.max_render_size_bytes as i64)
            }
            SettingField::RenderableTypes => SettingValue::Types(self.renderable_types.clone()),
            SettingField::SamplingFactor => SettingValue::Float(self.sampling_factor),
            SettingField::DisplayMode => SettingValue::Mode(self.display_mode),
            SettingField::SamplingMethod => SettingValue::Sampling(self.sampling_method),
            SettingField::ColumnSamplingMethod => {
                SettingValue::Sampling(self.column_sampling_method)
            }
            SettingField::RowSamplingMethod => SettingValue::Sampling(self.row_sampling_method),
            SettingField::SamplingSeed => SettingValue::Int(self.sampling_seed as i64),
            SettingField::ResetIndexValues => SettingValue::Bool(self.reset_index_values),
            SettingField::FlattenIndexValues => SettingValue::Bool(self.flatten_index_values),
            SettingField::FlattenColumnValues => SettingValue::Bool(self.flatten_column_values),
            SettingField::StringifyIndexValues => SettingValue::Bool(self.stringify_index_values),
            SettingField::StringifyColumnValues => {
                SettingValue::Bool(self.stringify_column_values)
            }
            SettingField::DatetimeStringFormat => {
                SettingValue::Str(self.datetime_string_format.clone())
            }
            SettingField::EnableTracking => SettingValue::Bool(self.enable_tracking),
        }
    }

    /// Capture every field in declaration order. This is the rollback
    /// target for scoped overrides.
    pub fn snapshot(&self) -> Vec<(SettingField, SettingValue)> {
        SettingField::ALL
            .iter()
            .map(|&field| (field, self.get(field)))
            .collect()
    }

    fn push_engine_mirrors(&self, engine: &mut dyn EngineOptions) {
        engine.set(
            EngineOption::MaxColumns,
            EngineOptionValue::Limit(self.display_max_columns),
        );
        engine.set(
            EngineOption::MaxRows,
            EngineOptionValue::Limit(self.display_max_rows),
        );
        engine.set(
            EngineOption::TableSchema,
            EngineOptionValue::Flag(self.html_table_schema),
        );
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn display_max_rows(&self) -> u64 {
        self.display_max_rows
    }

    pub fn display_max_columns(&self) -> u64 {
        self.display_max_columns
    }

    pub fn html_table_schema(&self) -> bool {
        self.html_table_schema
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn max_render_size_bytes(&self) -> u64 {
        self.max_render_size_bytes
    }

    pub fn renderable_types(&self) -> &BTreeSet<RenderableType> {
        &self.renderable_types
    }

    pub fn sampling_factor(&self) -> f64 {
        self.sampling_factor
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn sampling_method(&self) -> SamplingMethod {
        self.sampling_method
    }

    pub fn column_sampling_method(&self) -> SamplingMethod {
        self.column_sampling_method
    }

    pub fn row_sampling_method(&self) -> SamplingMethod {
        self.row_sampling_method
    }

    pub fn sampling_seed(&self) -> u64 {
        self.sampling_seed
    }

    pub fn reset_index_values(&self) -> bool {
        self.reset_index_values
    }

    pub fn flatten_index_values(&self) -> bool {
        self.flatten_index_values
    }

    pub fn flatten_column_values(&self) -> bool {
        self.flatten_column_values
    }

    pub fn stringify_index_values(&self) -> bool {
        self.stringify_index_values
    }

    pub fn stringify_column_values(&self) -> bool {
        self.stringify_column_values
    }

    pub fn datetime_string_format(&self) -> &str {
        &self.datetime_string_format
    }

    pub fn enable_tracking(&self) -> bool {
        self.enable_tracking
    }
}

fn expect_non_negative(field: SettingField, value: SettingValue) -> Result<u64> {
    match value {
        SettingValue::Int(v) if v >= 0 => Ok(v as u64),
        SettingValue::Int(_) => Err(Error::InvalidValue {
            field: field.as_str(),
            reason: "must be >= 0".to_string(),
        }),
        other => Err(kind_mismatch(field, "integer", &other)),
    }
}

fn expect_bool(field: SettingField, value: SettingValue) -> Result<bool> {
    match value {
        SettingValue::Bool(v) => Ok(v),
        other => Err(kind_mismatch(field, "boolean", &other)),
    }
}

fn expect_float(field: SettingField, value: SettingValue) -> Result<f64> {
    match value {
        SettingValue::Float(v) => Ok(v),
        SettingValue::Int(v) => Ok(v as f64),
        other => Err(kind_mismatch(field, "float", &other)),
    }
}

fn expect_string(field: SettingField, value: SettingValue) -> Result<String> {
    match value {
        SettingValue::Str(v) => Ok(v),
        other => Err(kind_mismatch(field, "string", &other)),
    }
}

fn expect_mode(field: SettingField, value: SettingValue) -> Result<DisplayMode> {
    match value {
        SettingValue::Mode(v) => Ok(v),
        other => Err(kind_mismatch(field, "display mode", &other)),
    }
}

fn expect_sampling(field: SettingField, value: SettingValue) -> Result<SamplingMethod> {
    match value {
        SettingValue::Sampling(v) => Ok(v),
        other => Err(kind_mismatch(field, "sampling method", &other)),
    }
}

fn expect_level(field: SettingField, value: SettingValue) -> Result<LogLevel> {
    match value {
        SettingValue::Level(v) => Ok(v),
        SettingValue::Int(v) => LogLevel::from_numeric(v),
        other => Err(kind_mismatch(field, "log level", &other)),
    }
}

fn expect_types(
    field: SettingField,
    value: SettingValue,
) -> Result<BTreeSet<RenderableType>> {
    match value {
        SettingValue::Types(v) => Ok(v),
        other => Err(kind_mismatch(field, "renderable type set", &other)),
    }
}

fn kind_mismatch(field: SettingField, expected: &str, got: &SettingValue) -> Error {
    Error::InvalidValue {
        field: field.as_str(),
        reason: format!("expected {}, got {}", expected, got.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InMemoryEngine;

    #[test]
    fn test_defaults_mirror_into_engine_on_construction() {
        let mut engine = InMemoryEngine::new();
        let store = SettingsStore::new(&mut engine);

        assert_eq!(store.display_max_rows(), 60);
        assert_eq!(
            engine.get(EngineOption::MaxRows),
            Some(EngineOptionValue::Limit(60))
        );
        assert_eq!(
            engine.get(EngineOption::MaxColumns),
            Some(EngineOptionValue::Limit(20))
        );
        assert_eq!(
            engine.get(EngineOption::TableSchema),
            Some(EngineOptionValue::Flag(false))
        );
    }

    #[test]
    fn test_assign_pushes_validated_geometry_to_engine() {
        let mut engine = InMemoryEngine::new();
        let mut store = SettingsStore::new(&mut engine);

        store
            .assign(SettingField::DisplayMaxRows, SettingValue::Int(5), &mut engine)
            .unwrap();
        assert_eq!(store.display_max_rows(), 5);
        assert_eq!(
            engine.get(EngineOption::MaxRows),
            Some(EngineOptionValue::Limit(5))
        );
    }

    #[test]
    fn test_negative_rows_fail_and_leave_field_untouched() {
        let mut engine = InMemoryEngine::new();
        let mut store = SettingsStore::new(&mut engine);

        let err = store
            .assign(SettingField::DisplayMaxRows, SettingValue::Int(-1), &mut engine)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field, .. } if field == "display_max_rows"));
        assert_eq!(store.display_max_rows(), 60);
        assert_eq!(
            engine.get(EngineOption::MaxRows),
            Some(EngineOptionValue::Limit(60))
        );
    }

    #[test]
    fn test_string_values_coerce_to_declared_types() {
        let mut engine = InMemoryEngine::new();
        let mut store = SettingsStore::new(&mut engine);

        store
            .assign(
                SettingField::DisplayMode,
                SettingValue::Str("enhanced".to_string()),
                &mut engine,
            )
            .unwrap();
        assert_eq!(store.display_mode(), DisplayMode::Enhanced);

        store
            .assign(
                SettingField::RenderableTypes,
                SettingValue::Str("int, str".to_string()),
                &mut engine,
            )
            .unwrap();
        assert_eq!(store.renderable_types().len(), 2);
    }

    #[test]
    fn test_unresolvable_type_token_is_named() {
        let mut engine = InMemoryEngine::new();
        let mut store = SettingsStore::new(&mut engine);

        let err = store
            .assign(
                SettingField::RenderableTypes,
                SettingValue::Str("dataframe, gadget".to_string()),
                &mut engine,
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvableType(token) if token == "gadget"));
        // prior value kept
        assert_eq!(store.renderable_types(), &RenderableType::default_set());
    }

    #[test]
    fn test_sampling_factor_domain_check() {
        let mut engine = InMemoryEngine::new();
        let mut store = SettingsStore::new(&mut engine);

        let err = store
            .assign(SettingField::SamplingFactor, SettingValue::Float(1.5), &mut engine)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field, .. } if field == "sampling_factor"));
        assert_eq!(store.sampling_factor(), 0.1);
    }

    #[test]
    fn test_kind_mismatch_is_reported() {
        let mut engine = InMemoryEngine::new();
        let mut store = SettingsStore::new(&mut engine);

        let err = store
            .assign(SettingField::HtmlTableSchema, SettingValue::Int(1), &mut engine)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field, .. } if field == "html_table_schema"));
    }

    #[test]
    fn test_snapshot_round_trips_through_assign() {
        let mut engine = InMemoryEngine::new();
        let mut store = SettingsStore::new(&mut engine);
        let snapshot = store.snapshot();

        store
            .assign(SettingField::DisplayMaxRows, SettingValue::Int(3), &mut engine)
            .unwrap();
        store
            .assign(
                SettingField::DisplayMode,
                SettingValue::Mode(DisplayMode::Plain),
                &mut engine,
            )
            .unwrap();

        for (field, value) in snapshot {
            store.assign(field, value, &mut engine).unwrap();
        }
        assert_eq!(store, SettingsStore::default());
    }

    #[test]
    fn test_from_overrides_applies_validated_values() {
        let mut engine = InMemoryEngine::new();
        let store = SettingsStore::from_overrides(
            vec![
                ("DISPLAY_MAX_ROWS".to_string(), SettingValue::Int(7)),
                (
                    "display_mode".to_string(),
                    SettingValue::Str("plain".to_string()),
                ),
            ],
            &mut engine,
        )
        .unwrap();

        assert_eq!(store.display_max_rows(), 7);
        assert_eq!(store.display_mode(), DisplayMode::Plain);
        assert_eq!(
            engine.get(EngineOption::MaxRows),
            Some(EngineOptionValue::Limit(7))
        );
    }

    #[test]
    fn test_env_style_variables_map_onto_fields() {
        let mut engine = InMemoryEngine::new();
        let vars = vec![
            ("FRAMELENS_DISPLAY_MAX_ROWS".to_string(), "9".to_string()),
            ("FRAMELENS_DISPLAY_MODE".to_string(), "plain".to_string()),
            ("UNRELATED_VAR".to_string(), "ignored".to_string()),
            ("FRAMELENS_NOT_A_SETTING".to_string(), "ignored".to_string()),
        ];

        let store = SettingsStore::from_env_vars(vars, &mut engine).unwrap();
        assert_eq!(store.display_max_rows(), 9);
        assert_eq!(store.display_mode(), DisplayMode::Plain);
        assert_eq!(
            engine.get(EngineOption::MaxRows),
            Some(EngineOptionValue::Limit(9))
        );
    }

    #[test]
    fn test_env_style_variables_fail_loudly_on_bad_values() {
        let mut engine = InMemoryEngine::new();
        let vars = vec![("FRAMELENS_DISPLAY_MAX_ROWS".to_string(), "lots".to_string())];

        let err = SettingsStore::from_env_vars(vars, &mut engine).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field, .. } if field == "display_max_rows"));
    }

    #[test]
    fn test_serialized_form_uses_canonical_field_names() {
        let store = SettingsStore::default();
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["display_max_rows"], 60);
        assert_eq!(json["display_mode"], "simple");
        assert_eq!(json["media_type"], "application/vnd.dataresource+json");
    }
}
