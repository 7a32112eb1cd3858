//! Registry credentials

mod errors;
mod models;
mod store;

pub use errors::*;
pub use models::*;
pub use store::{CredentialsFile, nerf_dart};

use mockall::automock;

/// Looks up the credentials that apply to a registry.
#[automock]
pub trait CredentialResolver: Send + Sync {
    /// Resolve the auth descriptor for the registry at `uri`.
    ///
    /// # Errors
    ///
    /// Returns an error if stored credentials exist but cannot be decoded.
    fn credentials_by_uri(&self, uri: &str) -> Result<Auth, CredentialsError>;
}
