//! Prompt commands

use clap::ValueEnum;
use std::fmt;

/// A keyword accepted at the prompt
///
/// Also the value set of the one-shot command argument, which leaves out the
/// prompt-only `clear` and `exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Command {
    /// List the commands
    Help,
    #[value(skip)]
    Clear,
    /// Server time on the exchange
    #[value(name = "servertime")]
    ServerTime,
    /// Available pairs on the exchange
    Pairs,
    /// Ticker information for a pair
    Ticker,
    /// Recent trades for a pair
    Trades,
    /// Order book depth for a pair
    Depth,
    #[value(skip)]
    Exit,
}

impl Command {
    #[cfg(test)]
    pub(crate) const ALL: [Command; 8] = [
        Command::Help,
        Command::Clear,
        Command::ServerTime,
        Command::Pairs,
        Command::Ticker,
        Command::Trades,
        Command::Depth,
        Command::Exit,
    ];

    /// Exact match on the trimmed input
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "help" => Some(Self::Help),
            "clear" => Some(Self::Clear),
            "servertime" => Some(Self::ServerTime),
            "pairs" => Some(Self::Pairs),
            "ticker" => Some(Self::Ticker),
            "trades" => Some(Self::Trades),
            "depth" => Some(Self::Depth),
            "exit" | "quit" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Keyword as typed at the prompt
    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Clear => "clear",
            Self::ServerTime => "servertime",
            Self::Pairs => "pairs",
            Self::Ticker => "ticker",
            Self::Trades => "trades",
            Self::Depth => "depth",
            Self::Exit => "exit",
        }
    }

    /// Whether a pair symbol must be read before fetching
    pub fn needs_symbol(self) -> bool {
        matches!(self, Self::Ticker | Self::Trades | Self::Depth)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
