//! Registry token CLI

use std::process::ExitCode;

use crate::cli::Cli;

mod cli;
mod config;
mod observability;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    if let Err(error) = cli.run().await {
        tracing::debug!(%error, "command failed");

        #[expect(clippy::print_stderr, reason = "command errors are shown to the user")]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
