use clap::{Parser, Subcommand};

use crate::config::LoggingConfig;

mod completion;
mod token;

#[derive(Debug, Parser)]
#[command(name = "regtoken", about = "Registry access token manager", version, long_about = None)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List, create, or revoke registry access tokens
    Token(token::TokenCommand),

    /// Print completion candidates for the words following `token`
    #[command(hide = true)]
    Completion(completion::CompletionArgs),
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Token(command) => token::run(command).await,
            Commands::Completion(args) => completion::run(&args),
        }
    }
}
