use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Defines how the requested flags of a [`KindFilter`](super::KindFilter) are combined.
///
/// - `Any`: the operator kind shares at least one flag with the filter.
/// - `All`: the operator kind carries every flag of the filter.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Any,
    All,
}

impl FromStr for MatchMode {
    type Err = CoreError;
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(MatchMode::Any),
            "all" => Ok(MatchMode::All),
            other => Err(CoreError::UnknownMatchMode(other.to_string())),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchMode::Any => "any",
            MatchMode::All => "all",
        };
        f.write_str(s)
    }
}
