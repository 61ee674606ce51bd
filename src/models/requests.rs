//! Request DTOs for the cache HTTP facade
//!
//! Writes take the raw JSON payload as their body, so the only structured
//! input is the read query string.

use serde::Deserialize;

/// Query parameters for `GET /cache/:category`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    /// Return the payload even if it has expired, without evicting it
    #[serde(default)]
    pub ignore_expiry: bool,
}
