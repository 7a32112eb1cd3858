//! Token command errors.

use thiserror::Error;

use crate::{credentials::CredentialsError, profile::ProfileError, prompt::PromptError};

/// A token that could not be removed, with the reason the registry gave.
#[derive(Debug)]
pub struct RemovalFailure {
    /// Key or token value that was sent for removal.
    pub key: String,

    /// Why the registry refused.
    pub error: ProfileError,
}

/// Errors that can occur while running a token subcommand.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The first argument names no known subcommand.
    #[error("{0} is not a recognized subcommand")]
    UnknownSubcommand(String),

    /// `revoke` was given no identifiers.
    #[error("`<tokenKey>` argument is required")]
    MissingTokenKey,

    /// A CIDR entry is a valid IPv6 network.
    #[error("CIDR whitelist can only contain IPv4 addresses, {0} is IPv6")]
    Ipv6Cidr(String),

    /// A CIDR entry is not a valid network.
    #[error("CIDR whitelist contains invalid CIDR entry: {0}")]
    InvalidCidr(String),

    /// An identifier prefixes more than one token key.
    #[error("Token ID \"{0}\" was ambiguous, a longer ID is needed")]
    AmbiguousToken(String),

    /// An identifier matches no token key or value.
    #[error("Unknown token id or value \"{0}\".")]
    UnknownToken(String),

    /// One or more deletions failed.
    #[error("{}", describe_removal_failures(.0))]
    RemoveFailed(Vec<RemovalFailure>),

    /// The registry call failed.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Stored credentials could not be used.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// The user could not be prompted.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// JSON output could not be produced.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl TokenError {
    /// Short machine-readable code for the error, where one applies.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::UnknownSubcommand(_) | Self::MissingTokenKey => Some("EUSAGE"),
            Self::Ipv6Cidr(_) | Self::InvalidCidr(_) => Some("EINVALIDCIDR"),
            Self::AmbiguousToken(_) => Some("EAMBIGUOUS"),
            Self::UnknownToken(_) => Some("ENOTFOUND"),
            Self::RemoveFailed(_) => Some("EREMOVE"),
            Self::Profile(ProfileError::OtpRequired) => Some("EOTP"),
            Self::Profile(_) | Self::Credentials(_) | Self::Prompt(_) | Self::Json(_) => None,
        }
    }
}

fn describe_removal_failures(failures: &[RemovalFailure]) -> String {
    let noun = if failures.len() == 1 { "token" } else { "tokens" };
    let mut message = format!("failed to remove {} {noun}:", failures.len());

    for failure in failures {
        message.push_str(&format!("\n  {}: {}", failure.key, failure.error));
    }

    message
}
