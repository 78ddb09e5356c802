use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::object::{LogFormat, LogLevel};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Filter directives (e.g. "info", "pd_core=debug,info").
    pub level: LogLevel,
    /// Include the event target (module path) in each record.
    pub with_targets: bool,
    /// Colorize text output when stderr is a terminal.
    pub use_color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LogConfig {
    /// Color is used only when enabled and stderr is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}
