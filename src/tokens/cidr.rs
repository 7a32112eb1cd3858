//! CIDR whitelist validation.

use std::net::Ipv4Addr;

use ipnetwork::IpNetwork;

use crate::tokens::TokenError;

/// Validate `--cidr` values. Each value may hold several comma-separated
/// entries; every entry must be an IPv4 network in `address/prefix` form.
/// Entries are returned unchanged and in order.
///
/// # Errors
///
/// Returns [`TokenError::Ipv6Cidr`] or [`TokenError::InvalidCidr`] naming the
/// first offending entry.
pub fn validate_cidr_list<S: AsRef<str>>(values: &[S]) -> Result<Vec<String>, TokenError> {
    values
        .iter()
        .flat_map(|value| value.as_ref().split(','))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| validate_cidr(entry).map(|()| entry.to_string()))
        .collect()
}

fn validate_cidr(entry: &str) -> Result<(), TokenError> {
    let Some((address, _prefix)) = entry.split_once('/') else {
        return Err(TokenError::InvalidCidr(entry.to_string()));
    };

    match entry.parse::<IpNetwork>() {
        Ok(IpNetwork::V4(_)) if address.parse::<Ipv4Addr>().is_ok() => Ok(()),
        Ok(IpNetwork::V6(_)) => Err(TokenError::Ipv6Cidr(entry.to_string())),
        _ => Err(TokenError::InvalidCidr(entry.to_string())),
    }
}
