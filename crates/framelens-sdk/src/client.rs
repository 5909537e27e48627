use framelens_settings::{
    EngineOptions, FormatterRegistry, InMemoryEngine, LogSink, NoopFormatters, NoopLogSink,
    Overrides, SettingsRuntime, SettingsStore,
};
use framelens_types::{DisplayMode, LogLevel, RenderableType, Result, SettingValue};

/// Root context owning the settings runtime and its collaborators.
///
/// The embedding shell creates one `Client` per process and passes it (or
/// the [`crate::global`] handle) to everything that reads or mutates
/// display configuration. All mutation goes through the client; the store
/// itself is never written directly.
pub struct Client {
    runtime: SettingsRuntime,
}

impl Client {
    /// Wire up a client against real collaborators, overlaying defaults
    /// with `FRAMELENS_*` environment overrides.
    pub fn new(
        engine: Box<dyn EngineOptions>,
        formatters: Box<dyn FormatterRegistry>,
        log: Box<dyn LogSink>,
    ) -> Result<Self> {
        Ok(Self {
            runtime: SettingsRuntime::new(engine, formatters, log)?,
        })
    }

    /// Wire up a client against explicit collaborators from built-in
    /// defaults, ignoring the environment.
    pub fn with_collaborators(
        engine: Box<dyn EngineOptions>,
        formatters: Box<dyn FormatterRegistry>,
        log: Box<dyn LogSink>,
    ) -> Self {
        Self {
            runtime: SettingsRuntime::with_defaults(engine, formatters, log),
        }
    }

    /// Standalone client: in-memory engine mirror, no session formatters,
    /// no logger. Useful outside a notebook shell and in examples.
    pub fn with_defaults() -> Self {
        Self::with_collaborators(
            Box::new(InMemoryEngine::new()),
            Box::new(NoopFormatters),
            Box::new(NoopLogSink),
        )
    }

    /// Standalone client with `FRAMELENS_*` environment overrides applied.
    pub fn from_env() -> Result<Self> {
        Self::new(
            Box::new(InMemoryEngine::new()),
            Box::new(NoopFormatters),
            Box::new(NoopLogSink),
        )
    }

    /// Live view of the configuration.
    pub fn settings(&self) -> &SettingsStore {
        self.runtime.settings()
    }

    /// Read access to the engine's mirrored option store.
    pub fn engine(&self) -> &dyn EngineOptions {
        self.runtime.engine()
    }

    /// The display mode last applied to the session's formatters.
    pub fn active_mode(&self) -> Option<DisplayMode> {
        self.runtime.active_mode()
    }

    /// Set a single setting by (case-insensitive) name.
    pub fn set_option(&mut self, name: &str, value: impl Into<SettingValue>) -> Result<()> {
        self.runtime.set_option(name, value)
    }

    /// Switch the rendering formatter chain for the session.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<()> {
        self.runtime.set_display_mode(mode)
    }

    /// Adjust the verbosity of this package's logger.
    pub fn set_log_level(&mut self, level: LogLevel) -> Result<()> {
        self.runtime.set_log_level(level)
    }

    /// Union one or more types into the renderable-type registry.
    pub fn add_renderable_type(
        &mut self,
        types: impl IntoIterator<Item = RenderableType>,
    ) -> Result<()> {
        self.runtime.add_renderable_types(types)
    }

    /// Apply `overrides` for the duration of `scope`, restoring every
    /// field (and the mirrored engine options and display mode) afterwards
    /// regardless of how the scope exits. See
    /// [`SettingsRuntime::scoped`] for the ordering guarantees.
    pub fn settings_context<T, F>(&mut self, overrides: Overrides, scope: F) -> Result<T>
    where
        F: FnOnce(&mut SettingsRuntime) -> Result<T>,
    {
        self.runtime.scoped(overrides, scope)
    }
}
