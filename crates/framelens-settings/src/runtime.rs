use tracing::debug;

use framelens_types::{
    DisplayMode, Error, LogLevel, RenderableType, Result, SettingField, SettingValue,
};

use crate::controller::ModeController;
use crate::engine::{EngineOption, EngineOptionValue, EngineOptions};
use crate::formatters::FormatterRegistry;
use crate::logging::LogSink;
use crate::store::SettingsStore;

/// Ordered batch of scoped overrides, keyed by case-insensitive field name.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: Vec<(String, SettingValue)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override; application order follows insertion order.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.entries.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The single point of mutation for settings.
///
/// Owns the validated store together with the external collaborators it
/// must keep consistent: the display engine's option store, the session's
/// formatter registrations, and the process logger. Field writes are never
/// made against the store directly.
pub struct SettingsRuntime {
    store: SettingsStore,
    controller: ModeController,
    engine: Box<dyn EngineOptions>,
    formatters: Box<dyn FormatterRegistry>,
    log: Box<dyn LogSink>,
}

impl SettingsRuntime {
    /// Wire up a runtime, building the store from defaults overlaid with
    /// `FRAMELENS_*` environment overrides.
    pub fn new(
        mut engine: Box<dyn EngineOptions>,
        formatters: Box<dyn FormatterRegistry>,
        log: Box<dyn LogSink>,
    ) -> Result<Self> {
        let store = SettingsStore::from_env(engine.as_mut())?;
        Ok(Self {
            store,
            controller: ModeController::new(),
            engine,
            formatters,
            log,
        })
    }

    /// Wire up a runtime from built-in defaults, ignoring the environment.
    pub fn with_defaults(
        mut engine: Box<dyn EngineOptions>,
        formatters: Box<dyn FormatterRegistry>,
        log: Box<dyn LogSink>,
    ) -> Self {
        let store = SettingsStore::new(engine.as_mut());
        Self {
            store,
            controller: ModeController::new(),
            engine,
            formatters,
            log,
        }
    }

    /// Wire up a runtime with explicit construction-time overrides instead
    /// of environment lookups.
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (String, SettingValue)>,
        mut engine: Box<dyn EngineOptions>,
        formatters: Box<dyn FormatterRegistry>,
        log: Box<dyn LogSink>,
    ) -> Result<Self> {
        let store = SettingsStore::from_overrides(overrides, engine.as_mut())?;
        Ok(Self {
            store,
            controller: ModeController::new(),
            engine,
            formatters,
            log,
        })
    }

    /// Live view of the configuration.
    pub fn settings(&self) -> &SettingsStore {
        &self.store
    }

    /// Read access to the engine's mirrored option store.
    pub fn engine(&self) -> &dyn EngineOptions {
        self.engine.as_ref()
    }

    /// The display mode last applied to the session's formatters.
    pub fn active_mode(&self) -> Option<DisplayMode> {
        self.controller.current()
    }

    /// Set a single setting by (case-insensitive) name.
    ///
    /// Unknown names fail before anything mutates; validation failures
    /// leave the field at its prior value. Display-geometry fields are
    /// pushed to the engine, a display-mode change runs the formatter
    /// transition, and a log-level change is propagated to the logger.
    pub fn set_option(&mut self, name: &str, value: impl Into<SettingValue>) -> Result<()> {
        let field = SettingField::from_name(name)?;
        self.set_field(field, value.into())
    }

    /// Switch the rendering formatter chain for the session.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<()> {
        self.set_field(SettingField::DisplayMode, mode.into())
    }

    /// Adjust the verbosity of this package's logger.
    pub fn set_log_level(&mut self, level: LogLevel) -> Result<()> {
        self.set_field(SettingField::LogLevel, level.into())
    }

    /// Union one or more types into the renderable-type registry.
    pub fn add_renderable_types(
        &mut self,
        types: impl IntoIterator<Item = RenderableType>,
    ) -> Result<()> {
        let mut merged = self.store.renderable_types().clone();
        merged.extend(types);
        self.set_field(SettingField::RenderableTypes, merged.into())
    }

    fn set_field(&mut self, field: SettingField, value: SettingValue) -> Result<()> {
        self.store.assign(field, value, self.engine.as_mut())?;

        // The validator already mirrored the geometry fields, but some
        // callers write engine options without the validator path, so the
        // setter pushes the stored value again. The push is idempotent.
        match field {
            SettingField::DisplayMaxRows => {
                let rows = self.store.display_max_rows();
                debug!(option = EngineOption::MaxRows.key(), value = rows, "mirroring engine option");
                self.engine
                    .set(EngineOption::MaxRows, EngineOptionValue::Limit(rows));
            }
            SettingField::DisplayMaxColumns => {
                let columns = self.store.display_max_columns();
                debug!(option = EngineOption::MaxColumns.key(), value = columns, "mirroring engine option");
                self.engine
                    .set(EngineOption::MaxColumns, EngineOptionValue::Limit(columns));
            }
            SettingField::HtmlTableSchema => {
                let enabled = self.store.html_table_schema();
                debug!(option = EngineOption::TableSchema.key(), value = enabled, "mirroring engine option");
                self.engine
                    .set(EngineOption::TableSchema, EngineOptionValue::Flag(enabled));
            }
            SettingField::DisplayMode => {
                self.controller
                    .transition(self.store.display_mode(), self.formatters.as_mut());
            }
            SettingField::LogLevel => {
                self.log.set_level(self.store.log_level());
            }
            _ => {}
        }

        Ok(())
    }

    /// Apply `overrides` for the duration of `scope`, restoring every
    /// field afterwards.
    ///
    /// A `display_mode` override settles first, since a mode change can
    /// implicitly reset other fields the remaining overrides then layer on
    /// top of. On exit -- normal return or an error from override
    /// application or from `scope` -- every snapshot field is re-applied
    /// through the setter in declaration order, restoring the engine's
    /// mirrored options and the display mode along the way. Restoration
    /// failures surface as [`Error::Restore`], chained with the in-flight
    /// error rather than masking it; a restore failure with `original:
    /// None` means the body had completed and its value was dropped.
    /// Nested scopes restore LIFO.
    pub fn scoped<T, F>(&mut self, overrides: Overrides, scope: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.store.snapshot();

        let mut mode_override = None;
        let mut rest = Vec::with_capacity(overrides.entries.len());
        for (name, value) in overrides.entries {
            if name.trim().eq_ignore_ascii_case(SettingField::DisplayMode.as_str()) {
                mode_override = Some(value);
            } else {
                rest.push((name, value));
            }
        }

        let outcome = (|| {
            if let Some(value) = mode_override {
                self.set_field(SettingField::DisplayMode, value)?;
            }
            for (name, value) in rest {
                self.set_option(&name, value)?;
            }
            scope(self)
        })();

        let mut failed = Vec::new();
        for (field, value) in snapshot {
            if let Err(err) = self.set_field(field, value) {
                failed.push(err);
            }
        }

        if failed.is_empty() {
            outcome
        } else {
            Err(Error::Restore {
                failed,
                original: outcome.err().map(Box::new),
            })
        }
    }
}
