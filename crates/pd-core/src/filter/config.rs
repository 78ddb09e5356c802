use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{CoreError, CoreResult},
    filter::{KindFilter, MatchMode},
};

/// Kind filter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Filter expression in canonical kind form (e.g. "admin,leader").
    /// `None` selects every operator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// How the requested flags are combined.
    pub mode: MatchMode,
}

impl FilterConfig {
    pub fn new(kind: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            kind: Some(kind.into()),
            mode,
        }
    }
}

impl TryFrom<&FilterConfig> for KindFilter {
    type Error = CoreError;
    fn try_from(cfg: &FilterConfig) -> CoreResult<Self> {
        match cfg.kind.as_deref() {
            None => Ok(KindFilter::all()),
            Some(expr) => KindFilter::parse(expr, cfg.mode),
        }
    }
}

impl KindFilter {
    /// Builds a filter from configuration, failing on an unknown flag name.
    pub fn try_from_config(cfg: &FilterConfig) -> CoreResult<Self> {
        Self::try_from(cfg)
    }

    /// Builds a filter from configuration, falling back to match-all.
    ///
    /// An invalid expression is reported with the offending token and the
    /// whole filter is skipped.
    pub fn from_config_or_all(cfg: &FilterConfig) -> Self {
        match Self::try_from(cfg) {
            Ok(filter) => {
                debug!(filter = %filter, "kind filter configured");
                filter
            }
            Err(e) => {
                warn!(
                    expr = cfg.kind.as_deref().unwrap_or_default(),
                    error = %e,
                    "ignoring kind filter, selecting all operators"
                );
                Self::all()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_model::OpKind;

    #[test]
    fn default_selects_everything() {
        let cfg = FilterConfig::default();
        assert_eq!(cfg.kind, None);
        assert_eq!(cfg.mode, MatchMode::Any);
        assert!(KindFilter::try_from_config(&cfg).unwrap().is_match_all());
    }

    #[test]
    fn valid_expression_builds_filter() {
        let cfg = FilterConfig::new("merge,range", MatchMode::All);
        let filter = KindFilter::try_from_config(&cfg).unwrap();

        assert_eq!(filter.kinds(), Some(OpKind::MERGE | OpKind::RANGE));
        assert_eq!(filter.mode(), MatchMode::All);
    }

    #[test]
    fn invalid_expression_is_strict_error() {
        let cfg = FilterConfig::new("merge,rnage", MatchMode::Any);
        let err = KindFilter::try_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("rnage"));
    }

    #[test]
    fn invalid_expression_falls_back_to_all() {
        let cfg = FilterConfig::new("", MatchMode::Any);
        let filter = KindFilter::from_config_or_all(&cfg);
        assert!(filter.is_match_all());

        let cfg = FilterConfig::new("replica", MatchMode::Any);
        let filter = KindFilter::from_config_or_all(&cfg);
        assert_eq!(filter.kinds(), Some(OpKind::REPLICA));
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let cfg: FilterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, FilterConfig::default());

        let cfg: FilterConfig = serde_json::from_str(r#"{"kind": "admin"}"#).unwrap();
        assert_eq!(cfg.kind.as_deref(), Some("admin"));
        assert_eq!(cfg.mode, MatchMode::Any);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = FilterConfig::new("leader,hot-region", MatchMode::All);
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: FilterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, parsed);
    }
}
