//! Interactive prompt
//!
//! Reads one line at a time and runs each command to completion before the
//! next line is read. No state carries over between commands.

mod command;

pub use command::Command;

use crate::api::{ApiClient, ApiError, Transport};
use crate::present;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// What happened to a dispatched command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command finished, keep prompting
    Done,
    /// Command failed and was abandoned
    Failed,
    /// The user asked to leave
    Exit,
    /// Input ended before the command could run
    InputClosed,
}

/// Read-eval-print loop over an async line source and a sync output sink
pub struct Repl<T, R, W> {
    client: ApiClient<T>,
    input: R,
    out: W,
    clear_delay: Duration,
}

impl<T, R, W> Repl<T, R, W>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Create a prompt reading from `input` and printing to `out`
    pub fn new(client: ApiClient<T>, input: R, out: W) -> Self {
        Self {
            client,
            input,
            out,
            clear_delay: Duration::from_secs(1),
        }
    }

    /// Pause before `clear` wipes the screen
    pub fn clear_delay(mut self, delay: Duration) -> Self {
        self.clear_delay = delay;
        self
    }

    /// Consume the prompt and hand back the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until end of input or `exit`
    pub async fn run(&mut self) -> io::Result<()> {
        present::banner(&mut self.out)?;

        loop {
            present::prompt(&mut self.out)?;
            let Some(line) = self.next_line().await else {
                break;
            };

            match self.execute(line.trim(), None).await? {
                Outcome::Exit | Outcome::InputClosed => break,
                Outcome::Done | Outcome::Failed => {}
            }
        }

        tracing::debug!("Prompt loop finished");
        Ok(())
    }

    /// Parse and run one line of input
    pub async fn execute(&mut self, input: &str, symbol: Option<String>) -> io::Result<Outcome> {
        match Command::parse(input) {
            Some(command) => self.dispatch(command, symbol).await,
            None => {
                tracing::debug!(input = %input, "Unknown command");
                present::unknown_command(&mut self.out)?;
                Ok(Outcome::Failed)
            }
        }
    }

    /// Run a single command
    ///
    /// Commands that act on a pair use `symbol` when given, otherwise they
    /// prompt for it on the input stream.
    pub async fn dispatch(
        &mut self,
        command: Command,
        symbol: Option<String>,
    ) -> io::Result<Outcome> {
        let symbol = if command.needs_symbol() {
            match symbol {
                Some(symbol) => symbol.trim().to_string(),
                None => match self.read_symbol().await? {
                    Some(symbol) => symbol,
                    None => return Ok(Outcome::InputClosed),
                },
            }
        } else {
            String::new()
        };

        tracing::debug!(%command, symbol = %symbol, "Dispatching command");

        match command {
            Command::Help => {
                present::help(&mut self.out)?;
                Ok(Outcome::Done)
            }
            Command::Clear => {
                present::clearing(&mut self.out)?;
                tokio::time::sleep(self.clear_delay).await;
                present::clear_screen(&mut self.out)?;
                Ok(Outcome::Done)
            }
            Command::Exit => Ok(Outcome::Exit),
            Command::ServerTime => {
                let result = self.client.server_time().await;
                self.finish(result, present::server_time)
            }
            Command::Pairs => {
                let result = self.client.pairs().await;
                self.finish(result, |out, pairs| present::pairs(out, pairs))
            }
            Command::Ticker => {
                let result = self.client.ticker(&symbol).await;
                self.finish(result, present::ticker)
            }
            Command::Trades => {
                let result = self.client.trades(&symbol).await;
                self.finish(result, |out, trades| present::trades(out, trades))
            }
            Command::Depth => {
                let result = self.client.depth(&symbol).await;
                self.finish(result, |out, depth| present::depth(out, depth).map(|_| ()))
            }
        }
    }

    /// Present a decoded record, or report why the command was abandoned
    fn finish<D>(
        &mut self,
        result: Result<D, ApiError>,
        render: impl FnOnce(&mut W, &D) -> io::Result<()>,
    ) -> io::Result<Outcome> {
        match result {
            Ok(record) => {
                render(&mut self.out, &record)?;
                Ok(Outcome::Done)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Command failed");
                present::error(&mut self.out, &e)?;
                Ok(Outcome::Failed)
            }
        }
    }

    async fn read_symbol(&mut self) -> io::Result<Option<String>> {
        present::symbol_prompt(&mut self.out)?;
        Ok(self.next_line().await.map(|s| s.trim().to_string()))
    }

    /// Next input line, decoded lossily; `None` on end of input or an I/O error
    async fn next_line(&mut self) -> Option<String> {
        let mut buf = Vec::new();
        match self.input.read_until(b'\n', &mut buf).await {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                Some(String::from_utf8_lossy(&buf).into_owned())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input");
                None
            }
        }
    }
}
