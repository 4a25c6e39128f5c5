//! Backend configuration parsed from environment variables.

use super::types::SupabaseError;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupabaseTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for SupabaseTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Public connection values for the hosted backend. Both are safe to ship to
/// browsers; the anon key only grants what row-level policies allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub timeouts: SupabaseTimeouts,
}

impl SupabaseConfig {
    /// Validate the two public values. Absent or blank values are reported
    /// through `tracing` and returned as [`SupabaseError::MissingConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing variable.
    pub fn new(url: Option<String>, anon_key: Option<String>, timeouts: SupabaseTimeouts) -> Result<Self, SupabaseError> {
        let url = require(URL_VAR, url)?;
        let anon_key = require(ANON_KEY_VAR, anon_key)?;
        let url = url.trim_end_matches('/').to_owned();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SupabaseError::ConfigParse(format!("{URL_VAR} must be an http(s) URL, got '{url}'")));
        }
        Ok(Self { url, anon_key, timeouts })
    }

    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY`
    ///
    /// Optional:
    /// - `SUPABASE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SUPABASE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is absent or malformed.
    pub fn from_env() -> Result<Self, SupabaseError> {
        let timeouts = SupabaseTimeouts {
            request_secs: env_parse_u64("SUPABASE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("SUPABASE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Self::new(std::env::var(URL_VAR).ok(), std::env::var(ANON_KEY_VAR).ok(), timeouts)
    }

    /// Base URL of the auth API.
    #[must_use]
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.url)
    }

    /// Base URL of the REST API.
    #[must_use]
    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1{path}", self.url)
    }
}

fn require(var: &str, value: Option<String>) -> Result<String, SupabaseError> {
    match value.map(|v| v.trim().to_owned()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => {
            tracing::error!(%var, "backend configuration missing");
            Err(SupabaseError::MissingConfig { var: var.to_owned() })
        }
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
