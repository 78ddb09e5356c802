mod config;
mod error;
mod init;
mod object;

pub use config::LogConfig;
pub use error::{LogError, LogResult};
pub use object::{LogFormat, LogLevel};

/// Installs the global `tracing` subscriber described by `cfg`.
///
/// Text and JSON records go to stderr, leaving stdout to program output.
///
/// Fails with [`LogError::AlreadyInitialized`] when a global subscriber is
/// already set.
///
/// # Examples
/// ```no_run
/// use pd_observe::{LogConfig, init_logging};
///
/// init_logging(&LogConfig::default()).expect("logging must start once");
/// tracing::info!("logging ready");
/// ```
pub fn init_logging(cfg: &LogConfig) -> LogResult<()> {
    match cfg.format {
        LogFormat::Text => init::text(cfg),
        LogFormat::Json => init::json(cfg),
        LogFormat::Journald => init::journald(cfg),
    }
}
