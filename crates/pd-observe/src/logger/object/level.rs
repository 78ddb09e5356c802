use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::LogError;

/// Validated `EnvFilter` directive string (e.g. `"info"`, `"pd_core=debug,warn"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel(String);

impl LogLevel {
    pub fn new(s: impl Into<String>) -> Result<Self, LogError> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the filter for a subscriber.
    ///
    /// Falls back to `info` should the directive stop parsing, which cannot
    /// happen for a value that passed construction.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.as_str()).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(Self(s)),
            Err(e) => Err(LogError::InvalidLevel(format!("{s}: {e}"))),
        }
    }
}

impl From<LogLevel> for String {
    fn from(l: LogLevel) -> Self {
        l.0
    }
}
