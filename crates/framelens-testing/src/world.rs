use framelens_sdk::Client;
use framelens_settings::{EngineOption, EngineOptionValue};
use framelens_types::{LogLevel, Result, SettingValue};

use crate::recorders::{FormatterCall, RecordingEngine, RecordingFormatters, RecordingLog};

/// A client wired to recording doubles for every external collaborator.
///
/// The world keeps clones of the doubles' shared handles, so tests can
/// observe the engine's mirrored options, the formatter-registry call
/// sequence, and the log levels pushed by the option setter.
pub struct TestWorld {
    client: Client,
    engine: RecordingEngine,
    formatters: RecordingFormatters,
    log: RecordingLog,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// World built from default settings (environment ignored).
    pub fn new() -> Self {
        let engine = RecordingEngine::new();
        let formatters = RecordingFormatters::new();
        let log = RecordingLog::new();
        let client = Client::with_collaborators(
            Box::new(engine.clone()),
            Box::new(formatters.clone()),
            Box::new(log.clone()),
        );
        Self {
            client,
            engine,
            formatters,
            log,
        }
    }

    /// World built with explicit construction-time overrides.
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (&'static str, SettingValue)>,
    ) -> Result<Self> {
        let mut world = Self::new();
        for (name, value) in overrides {
            world.client.set_option(name, value)?;
        }
        Ok(world)
    }

    pub fn client(&mut self) -> &mut Client {
        &mut self.client
    }

    pub fn settings(&self) -> &framelens_settings::SettingsStore {
        self.client.settings()
    }

    pub fn engine_option(&self, option: EngineOption) -> Option<EngineOptionValue> {
        self.engine.get(option)
    }

    pub fn formatter_calls(&self) -> Vec<FormatterCall> {
        self.formatters.calls()
    }

    pub fn enhanced_registered(&self) -> bool {
        self.formatters.enhanced_registered()
    }

    pub fn log_levels(&self) -> Vec<LogLevel> {
        self.log.levels()
    }
}
