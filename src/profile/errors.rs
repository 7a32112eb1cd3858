//! Profile client errors.

use thiserror::Error;

/// Errors that can occur when talking to the registry profile API.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured registry is not a usable base URL.
    #[error("invalid registry url {0}")]
    InvalidRegistry(String),

    /// The registry wants a one-time password, or rejected the one supplied.
    #[error("this operation requires a one-time password")]
    OtpRequired,

    /// The registry returned a non-2xx response.
    #[error("unexpected response from registry: {0}")]
    UnexpectedResponse(String),
}
