//! TOML credentials file keyed by registry nerf dart.
//!
//! ```toml
//! ["//registry.npmjs.org/"]
//! token = "npm_..."
//!
//! ["//npm.example.com/"]
//! auth = "dXNlcjpwYXNz" # base64 of `user:pass`
//! ```

use std::{fs, io, path::PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::Url;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::credentials::{Auth, CredentialResolver, CredentialsError};

const DEFAULT_DIR: &str = ".regtoken";
const DEFAULT_FILE: &str = "credentials.toml";

#[derive(Debug, Default, Deserialize)]
struct StoredCredentials {
    token: Option<String>,
    auth: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

/// Credentials loaded from a TOML file on disk.
#[derive(Debug, Default)]
pub struct CredentialsFile {
    entries: FxHashMap<String, StoredCredentials>,
}

impl CredentialsFile {
    /// Location used when no explicit path is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, CredentialsError> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_DIR).join(DEFAULT_FILE))
            .ok_or(CredentialsError::NoHomeDirectory)
    }

    /// Load credentials from `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CredentialsError> {
        let path = path.into();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no credentials file");

                return Ok(Self::default());
            }
            Err(source) => return Err(CredentialsError::Read { path, source }),
        };

        Self::from_toml(&content).map_err(|source| CredentialsError::Parse { path, source })
    }

    /// Parse credentials from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a table of credential entries.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let entries = toml::from_str(content)?;

        Ok(Self { entries })
    }
}

impl CredentialResolver for CredentialsFile {
    fn credentials_by_uri(&self, uri: &str) -> Result<Auth, CredentialsError> {
        let Some(registry) = nerf_dart(uri) else {
            tracing::warn!(uri, "registry is not a valid URL, continuing without credentials");

            return Ok(Auth::Anonymous);
        };

        let Some(stored) = self.entries.get(&registry) else {
            return Ok(Auth::Anonymous);
        };

        if let Some(token) = &stored.token {
            return Ok(Auth::token(token.as_str()));
        }

        if let Some(encoded) = &stored.auth {
            return decode_basic_auth(&registry, encoded);
        }

        match (&stored.username, &stored.password) {
            (Some(username), Some(password)) => {
                Ok(Auth::basic(username.as_str(), password.as_str()))
            }
            _ => Ok(Auth::Anonymous),
        }
    }
}

/// Reduce a registry URL to the `//host[:port]/path/` form used as a
/// credentials key. The last path segment is dropped unless the path ends in
/// `/`.
pub fn nerf_dart(uri: &str) -> Option<String> {
    let url = Url::parse(uri).ok()?;
    let host = url.host_str()?;
    let port = url.port().map(|port| format!(":{port}")).unwrap_or_default();
    let dir = url.path().rsplit_once('/').map_or("", |(dir, _)| dir);

    Some(format!("//{host}{port}{dir}/"))
}

fn decode_basic_auth(registry: &str, encoded: &str) -> Result<Auth, CredentialsError> {
    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|source| CredentialsError::AuthEncoding {
            registry: registry.to_string(),
            source,
        })?;

    let decoded = String::from_utf8(decoded).map_err(|_utf8| CredentialsError::MalformedAuth {
        registry: registry.to_string(),
    })?;

    let (username, password) =
        decoded
            .split_once(':')
            .ok_or_else(|| CredentialsError::MalformedAuth {
                registry: registry.to_string(),
            })?;

    Ok(Auth::basic(username, password))
}
