use std::io;

use clap::Parser;
use tracing::debug;

use pd_observe::init_logging;

mod cli;
mod commands;
mod config;

use cli::{Cli, Command};
use config::CtlConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1) config file, then flag overrides
    let mut cfg = match &cli.config {
        Some(path) => CtlConfig::load(path)?,
        None => CtlConfig::default(),
    };
    if let Some(level) = cli.log_level.clone() {
        cfg.logger.level = level;
    }
    if let Some(format) = cli.log_format {
        cfg.logger.format = format;
    }

    // 2) logger
    init_logging(&cfg.logger)?;
    debug!(config = ?cli.config, "pd-ctl started");

    // 3) command
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Format { bits } => commands::format(&mut out, &bits),
        Command::Parse { text } => commands::parse(&mut out, &text),
        Command::Flags => commands::flags(&mut out),
        Command::Match {
            filter,
            mode,
            kinds,
        } => {
            let filter = commands::resolve_filter(filter.as_deref(), mode, &cfg.filter)?;
            commands::matches(&mut out, filter, &kinds)
        }
    }
}
