//! CLI configuration

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use regtoken::credentials::{CredentialsError, CredentialsFile};

/// Registry used when none is configured.
pub(crate) const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Registry connection settings.
#[derive(Debug, Args)]
pub(crate) struct RegistryConfig {
    /// Registry base URL
    #[arg(long, env = "REGTOKEN_REGISTRY", default_value = DEFAULT_REGISTRY)]
    pub registry: String,

    /// Credentials file (defaults to ~/.regtoken/credentials.toml)
    #[arg(long, env = "REGTOKEN_CREDENTIALS")]
    pub credentials_file: Option<PathBuf>,
}

impl RegistryConfig {
    /// Load the configured credentials file.
    pub(crate) fn credentials(&self) -> Result<CredentialsFile, CredentialsError> {
        let path = match &self.credentials_file {
            Some(path) => path.clone(),
            None => CredentialsFile::default_path()?,
        };

        CredentialsFile::load(path)
    }
}
