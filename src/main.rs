// aws-console - open the AWS Management Console with your current credentials

mod auth;
mod browser;
mod cli;
mod config;
mod console;
mod env;
mod error;
mod exec;
mod identity;
mod models;
mod workflow;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first to get verbose flag
    let args = cli::Cli::parse();

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr so stdout stays clean for `--print` and completions
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::execute(args).await?;
    Ok(())
}
