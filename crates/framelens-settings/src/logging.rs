use framelens_types::LogLevel;

/// Verbosity control for the process-wide logger of this package's
/// namespace. The option setter pushes `log_level` changes through here.
/// Implementations must be `Send` so they can live behind the
/// process-wide handle.
pub trait LogSink: Send {
    fn set_level(&mut self, level: LogLevel);
}

/// Sink that drops level changes; used when no logger is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn set_level(&mut self, _level: LogLevel) {}
}
