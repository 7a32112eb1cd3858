//! Registry profile API

mod errors;
pub mod http;
mod models;

pub use errors::*;
pub use http::HttpProfileClient;
pub use models::*;

use async_trait::async_trait;
use mockall::automock;

use crate::credentials::RequestAuth;

/// Token operations exposed by a registry.
#[automock]
#[async_trait]
pub trait ProfileClient: Send + Sync {
    /// Every token belonging to the authenticated account.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::OtpRequired`] when the registry wants a
    /// one-time password, or any transport or response error.
    async fn list_tokens(&self, auth: &RequestAuth) -> Result<Vec<TokenRecord>, ProfileError>;

    /// Mint a new token.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::OtpRequired`] when the registry wants a
    /// one-time password, or any transport or response error.
    async fn create_token(
        &self,
        auth: &RequestAuth,
        token: &NewToken,
    ) -> Result<TokenRecord, ProfileError>;

    /// Delete the token identified by `key`, which may also be a full token value.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::OtpRequired`] when the registry wants a
    /// one-time password, or any transport or response error.
    async fn remove_token(&self, auth: &RequestAuth, key: &str) -> Result<(), ProfileError>;
}
