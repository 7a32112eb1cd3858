//! Subcommand selection and shell completion.

use crate::tokens::TokenError;

/// Suggestions offered directly after `token`.
pub const SUBCOMMANDS: [&str; 3] = ["list", "revoke", "create"];

/// Subcommand of `token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAction {
    /// Show existing tokens.
    List,

    /// Mint a new token.
    Create,

    /// Delete tokens by key prefix or full value.
    Revoke,
}

impl TokenAction {
    /// Map a subcommand name, including the revoke aliases, to its action.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::UnknownSubcommand`] for any other name.
    pub fn from_name(name: &str) -> Result<Self, TokenError> {
        match name {
            "" | "list" => Ok(Self::List),
            "create" => Ok(Self::Create),
            "rm" | "revoke" | "delete" | "remove" => Ok(Self::Revoke),
            other => Err(TokenError::UnknownSubcommand(other.to_string())),
        }
    }

    /// Split positional arguments into the selected action and its operands.
    /// No arguments at all selects `list`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::UnknownSubcommand`] if the first argument is not a subcommand.
    pub fn parse(args: &[String]) -> Result<(Self, &[String]), TokenError> {
        match args.split_first() {
            None => Ok((Self::List, args)),
            Some((name, rest)) => Ok((Self::from_name(name)?, rest)),
        }
    }
}

/// Completion candidates for the words typed after `token`.
///
/// # Errors
///
/// Returns [`TokenError::UnknownSubcommand`] when completing below an unknown subcommand.
pub fn complete(words: &[String]) -> Result<Vec<&'static str>, TokenError> {
    match words.first() {
        None => Ok(SUBCOMMANDS.to_vec()),
        Some(name) => TokenAction::from_name(name).map(|_action| Vec::new()),
    }
}
