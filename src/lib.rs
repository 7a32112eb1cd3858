//! Manage package registry access tokens: list, create, and revoke them.

pub mod credentials;
pub mod otp;
pub mod profile;
pub mod prompt;
pub mod tokens;
