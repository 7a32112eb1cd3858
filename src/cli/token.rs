use std::error::Error as _;

use clap::Args;
use regtoken::{
    profile::HttpProfileClient,
    prompt::TerminalPrompt,
    tokens::{self, OutputFormat, TokenContext, TokenError, TokenOptions},
};

use crate::config::RegistryConfig;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(flatten)]
    pub registry: RegistryConfig,

    /// Print results as JSON
    #[arg(long, conflicts_with = "parseable")]
    pub json: bool,

    /// Print results as tab-separated lines
    #[arg(short, long)]
    pub parseable: bool,

    /// One-time password from your authenticator app
    #[arg(long, env = "REGTOKEN_OTP", hide_env_values = true)]
    pub otp: Option<String>,

    /// IPv4 CIDR range to restrict a new token to; repeat or comma-separate for several
    #[arg(long, value_name = "CIDR")]
    pub cidr: Vec<String>,

    /// Create a read-only token
    #[arg(long)]
    pub read_only: bool,

    /// `list`, `create`, or `revoke` (also `rm`, `delete`, `remove`) and its arguments
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    let TokenCommand {
        registry,
        json,
        parseable,
        otp,
        cidr,
        read_only,
        args,
    } = command;

    let credentials = registry
        .credentials()
        .map_err(|error| format!("failed to load credentials: {error}"))?;

    let profile = HttpProfileClient::new(&registry.registry)
        .map_err(|error| format!("failed to create registry client: {error}"))?;

    let options = TokenOptions {
        format: OutputFormat::from_flags(json, parseable),
        otp,
        cidr,
        read_only,
    };

    let prompt = TerminalPrompt::new();

    let context = TokenContext {
        registry: &registry.registry,
        options: &options,
        credentials: &credentials,
        profile: &profile,
        prompt: &prompt,
    };

    let output = tokens::execute(&context, &args)
        .await
        .map_err(|error| describe(&error))?;

    #[expect(clippy::print_stdout, reason = "command output belongs on stdout")]
    {
        println!("{output}");
    }

    Ok(())
}

fn describe(error: &TokenError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    // Causes already quoted by an outer message are not repeated.
    while let Some(cause) = source {
        let cause_text = cause.to_string();

        if !message.contains(&cause_text) {
            message.push_str(&format!("\n  caused by: {cause_text}"));
        }

        source = cause.source();
    }

    match error.code() {
        Some(code) => format!("{message}\ncode: {code}"),
        None => message,
    }
}
