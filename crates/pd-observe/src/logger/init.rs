use std::io;

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::logger::{
    config::LogConfig,
    error::{LogError, LogResult},
    object::UtcRfc3339,
};

pub(crate) fn text(cfg: &LogConfig) -> LogResult<()> {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(cfg.should_use_color())
        .with_target(cfg.with_targets)
        .with_timer(UtcRfc3339);

    install(tracing_subscriber::registry().with(cfg.level.to_env_filter()).with(layer))
}

pub(crate) fn json(cfg: &LogConfig) -> LogResult<()> {
    let layer = fmt::layer()
        .json()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(UtcRfc3339);

    install(tracing_subscriber::registry().with(cfg.level.to_env_filter()).with(layer))
}

#[cfg(target_os = "linux")]
pub(crate) fn journald(cfg: &LogConfig) -> LogResult<()> {
    let layer =
        tracing_journald::layer().map_err(|e| LogError::JournaldInitFailed(e.to_string()))?;

    install(tracing_subscriber::registry().with(cfg.level.to_env_filter()).with(layer))
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn journald(_cfg: &LogConfig) -> LogResult<()> {
    Err(LogError::JournaldNotSupported)
}

fn install<S>(subscriber: S) -> LogResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}
