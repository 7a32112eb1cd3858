//! Registry token models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// An access token as reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Stable identifier of the token.
    pub key: String,

    /// Token value. Registries usually mask all but a prefix when listing.
    pub token: String,

    /// When the token was minted.
    pub created: Timestamp,

    /// When the token was last changed.
    pub updated: Timestamp,

    /// Whether the token can only be used for read operations.
    pub readonly: bool,

    /// IPv4 ranges the token is restricted to, if any.
    #[serde(default)]
    pub cidr_whitelist: Option<Vec<String>>,
}

/// Token creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToken {
    /// Account password, required by the registry to mint a token.
    pub password: Zeroizing<String>,

    /// Restrict the token to read operations.
    pub readonly: bool,

    /// IPv4 ranges the token may be used from. Empty means unrestricted.
    pub cidr_whitelist: Vec<String>,
}
