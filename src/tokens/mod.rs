//! The `token` command: list, create, and revoke registry access tokens.

use std::fmt;

use crate::{
    credentials::{CredentialResolver, RequestAuth},
    profile::ProfileClient,
    prompt::Prompt,
};

mod cidr;
mod create;
mod dispatch;
mod errors;
mod list;
mod revoke;

#[cfg(test)]
mod test_support;

pub use cidr::validate_cidr_list;
pub use dispatch::{SUBCOMMANDS, TokenAction, complete};
pub use errors::*;

/// How results are written for the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tables for people.
    #[default]
    Human,

    /// Pretty-printed JSON.
    Json,

    /// Tab-separated lines for scripts.
    Parseable,
}

impl OutputFormat {
    /// Pick a format from the `--json` and `--parseable` flags. JSON wins if both are set.
    #[must_use]
    pub const fn from_flags(json: bool, parseable: bool) -> Self {
        if json {
            Self::Json
        } else if parseable {
            Self::Parseable
        } else {
            Self::Human
        }
    }
}

/// Options shared by the token subcommands.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    /// Output format for the rendered result.
    pub format: OutputFormat,

    /// One-time password supplied up front.
    pub otp: Option<String>,

    /// Raw `--cidr` values for `create`.
    pub cidr: Vec<String>,

    /// Create a read-only token.
    pub read_only: bool,
}

/// Everything a token subcommand needs to run against one registry.
#[derive(Clone, Copy)]
pub struct TokenContext<'a> {
    /// Registry URL, used to look up credentials.
    pub registry: &'a str,

    /// Command-line options.
    pub options: &'a TokenOptions,

    /// Source of stored credentials.
    pub credentials: &'a dyn CredentialResolver,

    /// Registry token API.
    pub profile: &'a dyn ProfileClient,

    /// Asks the user for passwords and one-time passwords.
    pub prompt: &'a dyn Prompt,
}

impl TokenContext<'_> {
    fn request_auth(&self) -> Result<RequestAuth, TokenError> {
        let auth = self.credentials.credentials_by_uri(self.registry)?;

        Ok(RequestAuth::new(auth, self.options.otp.clone()))
    }
}

impl fmt::Debug for TokenContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenContext")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Run the subcommand selected by `args` and return the rendered output.
/// Nothing is rendered unless the whole operation succeeds.
///
/// # Errors
///
/// Returns the first usage, validation, resolution or registry error.
#[tracing::instrument(name = "token", skip_all, fields(registry = %context.registry))]
pub async fn execute(context: &TokenContext<'_>, args: &[String]) -> Result<String, TokenError> {
    let (action, operands) = TokenAction::parse(args)?;

    match action {
        TokenAction::List => list::run(context).await,
        TokenAction::Create => create::run(context).await,
        TokenAction::Revoke => revoke::run(context, operands).await,
    }
}

fn join_cidr(cidr_whitelist: Option<&[String]>) -> String {
    cidr_whitelist.map(|list| list.join(",")).unwrap_or_default()
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
