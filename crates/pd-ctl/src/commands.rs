use std::io::Write;

use anyhow::Context;
use tracing::debug;

use pd_core::filter::{FilterConfig, KindFilter, MatchMode};
use pd_model::OpKind;

/// Accepts decimal or `0x`-prefixed hexadecimal.
pub fn parse_bits(raw: &str) -> anyhow::Result<u32> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.with_context(|| format!("invalid kind value: {raw}"))
}

pub fn format(out: &mut impl Write, raw: &str) -> anyhow::Result<()> {
    let kind = OpKind::from(parse_bits(raw)?);
    debug!(bits = kind.bits(), known = kind.is_known(), "formatting kind");

    writeln!(out, "{kind}")?;
    Ok(())
}

pub fn parse(out: &mut impl Write, text: &str) -> anyhow::Result<()> {
    let kind = OpKind::parse(text).context("failed to parse operator kind")?;
    debug!(bits = kind.bits(), "parsed kind");

    writeln!(out, "{:#x}\t{kind}", kind.bits())?;
    Ok(())
}

pub fn flags(out: &mut impl Write) -> anyhow::Result<()> {
    for flag in OpKind::all().defined_flags() {
        let name = flag.flag_name().unwrap_or_default();
        writeln!(out, "{}\t{:#06x}\t{name}", flag.bits().trailing_zeros(), flag.bits())?;
    }
    Ok(())
}

/// Resolves the filter to apply: an explicit expression is strict, the
/// configured one falls back to match-all.
pub fn resolve_filter(
    expr: Option<&str>,
    mode: Option<MatchMode>,
    cfg: &FilterConfig,
) -> anyhow::Result<KindFilter> {
    let mode = mode.unwrap_or(cfg.mode);
    match expr {
        Some(expr) => KindFilter::parse(expr, mode).context("failed to build kind filter"),
        None => Ok(KindFilter::from_config_or_all(&FilterConfig {
            kind: cfg.kind.clone(),
            mode,
        })),
    }
}

pub fn matches(out: &mut impl Write, filter: KindFilter, kinds: &[String]) -> anyhow::Result<()> {
    let parsed = kinds
        .iter()
        .map(|text| {
            OpKind::parse(text).with_context(|| format!("failed to parse operator kind {text:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    debug!(filter = %filter, count = parsed.len(), "matching kinds");
    for kind in parsed {
        let verdict = if filter.matches(kind) { "match" } else { "skip" };
        writeln!(out, "{kind}\t{verdict}")?;
    }
    Ok(())
}
