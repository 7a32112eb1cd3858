//! Credential lookup errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading or decoding stored credentials.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// No home directory to derive the default credentials path from.
    #[error("cannot determine home directory")]
    NoHomeDirectory,

    /// The credentials file exists but could not be read.
    #[error("failed to read credentials file {path}")]
    Read {
        /// Path of the credentials file.
        path: PathBuf,

        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },

    /// The credentials file is not valid TOML.
    #[error("failed to parse credentials file {path}")]
    Parse {
        /// Path of the credentials file.
        path: PathBuf,

        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },

    /// The `auth` entry is not valid base64.
    #[error("stored auth for {registry} is not valid base64")]
    AuthEncoding {
        /// Registry nerf dart the entry belongs to.
        registry: String,

        /// Underlying decode failure.
        #[source]
        source: base64::DecodeError,
    },

    /// The decoded `auth` entry is not `username:password`.
    #[error("stored auth for {registry} must be `username:password`")]
    MalformedAuth {
        /// Registry nerf dart the entry belongs to.
        registry: String,
    },
}
