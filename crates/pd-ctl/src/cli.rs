use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pd_core::filter::MatchMode;
use pd_observe::{LogFormat, LogLevel};

/// Inspect operator kinds and kind filters.
#[derive(Debug, Parser)]
#[command(name = "pd-ctl", version)]
pub struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directives, overrides the config file.
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log output format, overrides the config file.
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a raw kind value (decimal or 0x-prefixed hex) in canonical form.
    Format { bits: String },

    /// Parse a comma separated flag list.
    Parse { text: String },

    /// List every defined flag.
    Flags,

    /// Test kinds against a filter.
    Match {
        /// Filter expression; falls back to the configured filter.
        #[arg(long)]
        filter: Option<String>,

        /// How requested flags combine.
        #[arg(long)]
        mode: Option<MatchMode>,

        /// Operator kinds in canonical form.
        #[arg(required = true)]
        kinds: Vec<String>,
    },
}
