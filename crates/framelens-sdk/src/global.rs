use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use tracing::warn;

use framelens_settings::{Overrides, SettingsRuntime, SettingsStore};
use framelens_types::{DisplayMode, LogLevel, RenderableType, Result, SettingValue};

use crate::client::Client;

static GLOBAL: Lazy<Mutex<Client>> = Lazy::new(|| {
    let client = match Client::from_env() {
        Ok(client) => client,
        Err(err) => {
            warn!(error = %err, "ignoring invalid FRAMELENS_* environment overrides");
            Client::with_defaults()
        }
    };
    Mutex::new(client)
});

/// Process-wide client handle, created lazily (and memoized) on first use.
///
/// The mutex exists to satisfy Rust's requirements for globals; the
/// intended execution context is a single interactive session processing
/// one command at a time. Embedding shells that want explicit ownership
/// should construct a [`Client`] themselves instead.
pub fn global() -> &'static Mutex<Client> {
    &GLOBAL
}

fn lock() -> MutexGuard<'static, Client> {
    match GLOBAL.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Snapshot of the global configuration.
pub fn get_settings() -> SettingsStore {
    lock().settings().clone()
}

/// Set one global setting by (case-insensitive) name.
pub fn set_option(name: &str, value: impl Into<SettingValue>) -> Result<()> {
    lock().set_option(name, value)
}

/// Switch the global rendering formatter chain.
pub fn set_display_mode(mode: DisplayMode) -> Result<()> {
    lock().set_display_mode(mode)
}

/// Adjust the verbosity of this package's logger.
pub fn set_log_level(level: LogLevel) -> Result<()> {
    lock().set_log_level(level)
}

/// Union one or more types into the global renderable-type registry.
pub fn add_renderable_type(types: impl IntoIterator<Item = RenderableType>) -> Result<()> {
    lock().add_renderable_type(types)
}

/// Scoped overrides against the global client; every field is restored on
/// exit regardless of how the scope ends.
pub fn settings_context<T, F>(overrides: Overrides, scope: F) -> Result<T>
where
    F: FnOnce(&mut SettingsRuntime) -> Result<T>,
{
    lock().settings_context(overrides, scope)
}
