use anyhow::anyhow;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;

use framelens_settings::LogSink;
use framelens_types::LogLevel;

/// Map a settings-layer level onto the subscriber's filter.
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

/// Handle to the installed subscriber's level filter.
///
/// Implements [`LogSink`], so it can be handed to the client as the log
/// collaborator: `set_option("log_level", ...)` then adjusts the live
/// subscriber.
#[derive(Clone)]
pub struct LogHandle {
    handle: reload::Handle<LevelFilter, Registry>,
}

impl LogSink for LogHandle {
    fn set_level(&mut self, level: LogLevel) {
        // reload only fails if the subscriber is gone; nothing to do then
        let _ = self.handle.reload(level_filter(level));
    }
}

/// Install a process-wide fmt subscriber whose level can be adjusted at
/// runtime through the returned handle.
pub fn init_logging(level: LogLevel) -> anyhow::Result<LogHandle> {
    let (filter, handle) = reload::Layer::new(level_filter(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {}", err))?;
    Ok(LogHandle { handle })
}
