//! Settings machinery for the framelens display layer.
//!
//! This crate holds the validated settings store, the option setter, the
//! display-mode controller, and the scoped override context, plus the
//! traits that describe the external collaborators (display engine option
//! store, interactive-session formatter registry, process logger).
//!
//! All mutation flows through [`SettingsRuntime`]; the store is never
//! written directly, which is what keeps the engine's mirrored options and
//! the formatter registrations consistent with the stored values.

pub mod controller;
pub mod engine;
pub mod formatters;
pub mod logging;
pub mod runtime;
pub mod store;

pub use controller::ModeController;
pub use engine::{EngineOption, EngineOptionValue, EngineOptions, InMemoryEngine};
pub use formatters::{FormatterRegistry, NoopFormatters};
pub use logging::{LogSink, NoopLogSink};
pub use runtime::{Overrides, SettingsRuntime};
pub use store::SettingsStore;
