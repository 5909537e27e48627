/// Formatter-registration surface of the external interactive session.
///
/// The mode controller calls exactly one of these per mode transition.
/// Implementations must be idempotent: registering an already-registered
/// formatter, or resetting already-default formatters, is a no-op. They
/// must also be `Send` so they can live behind the process-wide handle.
pub trait FormatterRegistry: Send {
    /// Install the enhanced display formatter in the session
    fn register(&mut self);
    /// Remove the enhanced formatter, falling back to the baseline
    /// simple-table formatter
    fn deregister(&mut self);
    /// Restore the session's formatters to the environment default,
    /// removing all custom formatters
    fn reset(&mut self);
}

/// Registry that does nothing; used when no interactive session is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatters;

impl FormatterRegistry for NoopFormatters {
    fn register(&mut self) {}
    fn deregister(&mut self) {}
    fn reset(&mut self) {}
}
