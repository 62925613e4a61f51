//! Operator is a long lived process that reconciles MyApp resources.
#![deny(missing_docs)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use myapp_common::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// OTLP collector endpoint, traces and metrics are only exported when set.
    #[arg(long, env = "OPERATOR_OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,
}

/// Available Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the daemon
    Daemon(myapp_operator::myapp::Opts),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let telemetry = telemetry::init(args.otlp_endpoint.clone()).await?;

    info!(?args.command, ?args.otlp_endpoint, "starting operator");
    match args.command {
        Command::Daemon(opts) => myapp_operator::myapp::run(opts).await?,
    };

    // Flush traces and metrics before shutdown
    telemetry.shutdown()?;
    Ok(())
}
