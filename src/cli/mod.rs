//! CLI interface for indodax-cli
//!
//! Without a command the client starts the interactive prompt. With one it
//! runs that command once and exits.

use crate::config::Config;
use crate::repl::Command;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "indodax-cli")]
#[command(about = "Interactive client for the Indodax public market data API")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "indodax.toml")]
    pub config: String,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the log filter (e.g. "debug", "indodax_cli=trace")
    #[arg(long)]
    pub log_level: Option<String>,

    /// Run a single command and exit
    #[arg(value_enum)]
    pub command: Option<Command>,

    /// Pair symbol for ticker, trades and depth (e.g. btcidr)
    pub symbol: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref base_url) = self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(ref level) = self.log_level {
            config.telemetry.log_level = level.clone();
        }
    }
}
