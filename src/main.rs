use clap::Parser;
use indodax_cli::api::{ApiClient, HttpTransport};
use indodax_cli::cli::Cli;
use indodax_cli::config::Config;
use indodax_cli::repl::{Outcome, Repl};
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)?;
    cli.apply_overrides(&mut config);

    indodax_cli::telemetry::init_telemetry(&config.telemetry)?;

    let transport = HttpTransport::new(&config.api)?;
    tracing::info!(base_url = transport.base_url(), "Using Indodax API");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut repl = Repl::new(ApiClient::new(transport), stdin, std::io::stdout())
        .clear_delay(Duration::from_millis(config.repl.clear_delay_ms));

    match cli.command {
        None => {
            repl.run().await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(command) => match repl.dispatch(command, cli.symbol).await? {
            Outcome::Failed | Outcome::InputClosed => Ok(ExitCode::FAILURE),
            Outcome::Done | Outcome::Exit => Ok(ExitCode::SUCCESS),
        },
    }
}
