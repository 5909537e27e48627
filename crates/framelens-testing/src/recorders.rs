use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use framelens_settings::{EngineOption, EngineOptionValue, EngineOptions, FormatterRegistry, LogSink};
use framelens_types::LogLevel;

/// Formatter-registry action observed by [`RecordingFormatters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterCall {
    Register,
    Deregister,
    Reset,
}

/// Engine option store that keeps its state behind a shared handle, so a
/// test can keep a clone while the settings runtime owns the boxed double.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    options: Arc<Mutex<BTreeMap<EngineOption, EngineOptionValue>>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, option: EngineOption) -> Option<EngineOptionValue> {
        self.options.lock().unwrap().get(&option).copied()
    }
}

impl EngineOptions for RecordingEngine {
    fn set(&mut self, option: EngineOption, value: EngineOptionValue) {
        self.options.lock().unwrap().insert(option, value);
    }

    fn get(&self, option: EngineOption) -> Option<EngineOptionValue> {
        RecordingEngine::get(self, option)
    }
}

/// Formatter registry that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingFormatters {
    calls: Arc<Mutex<Vec<FormatterCall>>>,
}

impl RecordingFormatters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<FormatterCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Net registration state after replaying the recorded calls: `true`
    /// when the last state-changing call left the enhanced formatter
    /// registered.
    pub fn enhanced_registered(&self) -> bool {
        matches!(self.calls().last(), Some(FormatterCall::Register))
    }
}

impl FormatterRegistry for RecordingFormatters {
    fn register(&mut self) {
        self.calls.lock().unwrap().push(FormatterCall::Register);
    }

    fn deregister(&mut self) {
        self.calls.lock().unwrap().push(FormatterCall::Deregister);
    }

    fn reset(&mut self) {
        self.calls.lock().unwrap().push(FormatterCall::Reset);
    }
}

/// Log sink that records every level pushed through it.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    levels: Arc<Mutex<Vec<LogLevel>>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> Vec<LogLevel> {
        self.levels.lock().unwrap().clone()
    }
}

impl LogSink for RecordingLog {
    fn set_level(&mut self, level: LogLevel) {
        self.levels.lock().unwrap().push(level);
    }
}
