use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use pd_core::filter::FilterConfig;
use pd_observe::LogConfig;

/// Configuration file of `pd-ctl`; every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtlConfig {
    pub logger: LogConfig,
    pub filter: FilterConfig,
}

impl CtlConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}
