//! framelens-sdk: display configuration for tabular data in interactive
//! notebook sessions.
//!
//! # Overview
//!
//! `framelens-sdk` is the public surface of the framelens settings layer.
//! It decides how tabular datasets are rendered: which formatter chain is
//! active (`plain` / `simple` / `enhanced`), how many rows and columns
//! survive, and how oversized datasets get sampled down before rendering.
//! Configuration is validated on every write and mirrored into the display
//! engine's own option store, so the engine and the settings never drift
//! apart.
//!
//! # Quickstart
//!
//! ```
//! use framelens_sdk::{Client, DisplayMode, Overrides};
//!
//! # fn main() -> framelens_sdk::Result<()> {
//! let mut client = Client::with_defaults();
//! client.set_display_mode(DisplayMode::Enhanced)?;
//!
//! // Temporary overrides roll back on every exit path.
//! client.settings_context(Overrides::new().set("display_max_rows", 5), |rt| {
//!     assert_eq!(rt.settings().display_max_rows(), 5);
//!     Ok(())
//! })?;
//! assert_eq!(client.settings().display_max_rows(), 60);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! This SDK acts as a facade over:
//! - `framelens-types`: closed enumerations, the declared setting schema,
//!   and the error taxonomy
//! - `framelens-settings`: the validated store, option setter, mode
//!   controller, and scoped override context
//!
//! Notebook shells wire a [`Client`] to their real display engine and
//! formatter registry; standalone use falls back to in-memory stand-ins.
//! A process-wide handle is available through [`global()`] and the free
//! functions ([`get_settings`], [`set_option`], [`settings_context`], ...)
//! for environments where threading a client handle around is impractical.

pub mod client;
pub mod global;
pub mod logging;
pub mod sampling;

pub use client::Client;
pub use global::{
    add_renderable_type, get_settings, global, set_display_mode, set_log_level, set_option,
    settings_context,
};
pub use logging::{LogHandle, init_logging, level_filter};
pub use sampling::{RenderPlan, exceeds_render_budget, plan_render, rows_within_budget, sample_indices};

pub use framelens_settings::{
    EngineOption, EngineOptionValue, EngineOptions, FormatterRegistry, InMemoryEngine, LogSink,
    ModeController, NoopFormatters, NoopLogSink, Overrides, SettingsRuntime, SettingsStore,
};
pub use framelens_types::{
    DisplayMode, Error, LogLevel, RenderableType, Result, SamplingMethod, SettingField,
    SettingValue,
};
