//! Auth descriptors passed to the registry.

use std::fmt;

use zeroize::Zeroizing;

/// Credentials for a single registry.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// Bearer token.
    Token(Zeroizing<String>),

    /// HTTP basic credentials.
    Basic {
        /// Registry account name.
        username: String,

        /// Registry account password.
        password: Zeroizing<String>,
    },

    /// No stored credentials.
    Anonymous,
}

impl Auth {
    /// Bearer token auth.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(Zeroizing::new(token.into()))
    }

    /// Basic auth from a username and password.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Auth::Token(**redacted**)"),
            Self::Basic { username, .. } => f
                .debug_struct("Auth::Basic")
                .field("username", username)
                .field("password", &"**redacted**")
                .finish(),
            Self::Anonymous => f.write_str("Auth::Anonymous"),
        }
    }
}

/// Auth descriptor plus the one-time password for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAuth {
    /// Registry credentials.
    pub auth: Auth,

    /// One-time password, when the account has two-factor auth enabled.
    pub otp: Option<String>,
}

impl RequestAuth {
    /// Pair credentials with an optional one-time password.
    #[must_use]
    pub fn new(auth: Auth, otp: Option<String>) -> Self {
        Self { auth, otp }
    }

    /// The same credentials with `otp` replacing any previous code.
    #[must_use]
    pub fn with_otp(&self, otp: String) -> Self {
        Self {
            auth: self.auth.clone(),
            otp: Some(otp),
        }
    }
}
