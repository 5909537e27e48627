use std::collections::BTreeMap;
use std::fmt;

/// Option keys mirrored into the external display engine's option store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EngineOption {
    /// Maximum number of columns the engine renders
    MaxColumns,
    /// Maximum number of rows the engine renders
    MaxRows,
    /// Whether the engine emits a table schema alongside rendered output
    TableSchema,
}

impl EngineOption {
    /// The engine's own key for this option
    pub fn key(&self) -> &'static str {
        match self {
            EngineOption::MaxColumns => "display.max_columns",
            EngineOption::MaxRows => "display.max_rows",
            EngineOption::TableSchema => "html.table_schema",
        }
    }
}

impl fmt::Display for EngineOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value written into the engine's option store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOptionValue {
    /// Row/column count ceiling
    Limit(u64),
    /// Boolean toggle
    Flag(bool),
}

/// Key/value option API of the external display engine.
///
/// Writes must be idempotent: the setter pushes already-validated values
/// redundantly for callers that bypass the validator path. Implementations
/// must be `Send` so they can live behind the process-wide handle.
pub trait EngineOptions: Send {
    fn set(&mut self, option: EngineOption, value: EngineOptionValue);
    fn get(&self, option: EngineOption) -> Option<EngineOptionValue>;
}

/// In-memory engine option store.
///
/// Stands in for a real display engine when none is wired up, and backs
/// assertions in tests.
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    options: BTreeMap<EngineOption, EngineOptionValue>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EngineOptions for InMemoryEngine {
    fn set(&mut self, option: EngineOption, value: EngineOptionValue) {
        self.options.insert(option, value);
    }

    fn get(&self, option: EngineOption) -> Option<EngineOptionValue> {
        self.options.get(&option).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_round_trips() {
        let mut engine = InMemoryEngine::new();
        engine.set(EngineOption::MaxRows, EngineOptionValue::Limit(60));
        assert_eq!(
            engine.get(EngineOption::MaxRows),
            Some(EngineOptionValue::Limit(60))
        );
        assert_eq!(engine.get(EngineOption::TableSchema), None);
    }

    #[test]
    fn test_repeated_set_is_idempotent() {
        let mut engine = InMemoryEngine::new();
        engine.set(EngineOption::MaxColumns, EngineOptionValue::Limit(20));
        engine.set(EngineOption::MaxColumns, EngineOptionValue::Limit(20));
        assert_eq!(
            engine.get(EngineOption::MaxColumns),
            Some(EngineOptionValue::Limit(20))
        );
    }
}
