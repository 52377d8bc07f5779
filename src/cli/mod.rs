// CLI interface
pub mod commands;

use crate::config::{MAX_SESSION_DURATION, MIN_SESSION_DURATION};
use crate::error::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "aws-console")]
#[command(about = "Open the AWS Console in your browser using current credentials")]
#[command(
    long_about = "Authenticates using your AWS credentials and opens the AWS Management Console \
in your default web browser. If credentials are expired or missing, it will attempt to run \
'aws sso login' to refresh them."
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub open: OpenArgs,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options for opening the console (the default action)
#[derive(Args, Debug, Clone, Default)]
pub struct OpenArgs {
    /// AWS profile to use (defaults to AWS_PROFILE env var)
    #[arg(short, long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Region to open the console in (also used for STS when the profile has none)
    #[arg(long, env = "AWS_CONSOLE_REGION")]
    pub region: Option<String>,

    /// Console session duration in seconds [default: 43200, or config file value]
    #[arg(
        long,
        value_parser = clap::value_parser!(i32).range(MIN_SESSION_DURATION as i64..=MAX_SESSION_DURATION as i64)
    )]
    pub duration: Option<i32>,

    /// Print the sign-in URL instead of opening a browser
    #[arg(long)]
    pub print: bool,

    /// Don't run 'aws sso login' when credentials are not valid
    #[arg(long)]
    pub no_login: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completion scripts
    ///
    /// INSTALLATION:
    ///
    /// Bash:
    ///   eval "$(aws-console completions bash)"    # Add to ~/.bashrc
    ///
    /// Zsh:
    ///   eval "$(aws-console completions zsh)"     # Add to ~/.zshrc
    ///
    /// Fish:
    ///   aws-console completions fish > ~/.config/fish/completions/aws-console.fish
    ///
    /// PowerShell:
    ///   aws-console completions powershell | Out-String | Invoke-Expression
    ///
    /// Elvish:
    ///   eval (aws-console completions elvish | slurp)
    Completions {
        /// Shell type to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Write a commented sample config file
    Init,
    /// Show where the config file lives and whether it is valid
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

pub async fn execute(args: Cli) -> Result<()> {
    match args.command {
        Some(Commands::Config { command }) => commands::config::execute(command),
        Some(Commands::Completions { shell }) => {
            commands::completions::execute(shell);
            Ok(())
        }
        None => commands::console::execute(args.open).await,
    }
}
