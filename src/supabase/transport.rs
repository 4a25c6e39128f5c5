//! HTTP transport shared by both session client variants.
//!
//! Owns the pooled `reqwest::Client` and knows the backend's wire shapes:
//! auth endpoints under `/auth/v1`, table and RPC endpoints under `/rest/v1`.
//! Credential attachment is decided by the caller through `bearer`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

use super::config::SupabaseConfig;
use super::types::{Credentials, Session, SupabaseError, TableQuery};

/// `Accept` value asking the REST API for exactly one object instead of an array.
const SINGLE_OBJECT_ACCEPT: &str = "application/vnd.pgrst.object+json";

#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    config: Arc<SupabaseConfig>,
}

impl Transport {
    /// Build the pooled HTTP client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| SupabaseError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config: Arc::new(config) })
    }

    #[must_use]
    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// The anonymous key, used as bearer when no user session is attached.
    #[must_use]
    pub fn anon_key(&self) -> &str {
        &self.config.anon_key
    }

    pub async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, SupabaseError> {
        let url = self.config.auth_url("/token?grant_type=password");
        let req = self.http.post(url).json(credentials);
        let text = self.send(req, self.anon_key()).await?;
        parse_session(&text)
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<(), SupabaseError> {
        let url = self.config.auth_url("/signup");
        let req = self.http.post(url).json(credentials);
        self.send(req, self.anon_key()).await?;
        Ok(())
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        let url = self.config.auth_url("/logout");
        self.send(self.http.post(url), access_token).await?;
        Ok(())
    }

    pub async fn select_single(&self, query: &TableQuery, bearer: &str) -> Result<Value, SupabaseError> {
        let url = self.config.rest_url(&format!("/{}", query.table));
        let req = self
            .http
            .get(url)
            .query(&query.query_pairs())
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT_ACCEPT);
        let text = self.send(req, bearer).await?;
        parse_json_body(&text)
    }

    pub async fn rpc(&self, function: &str, params: &impl Serialize, bearer: &str) -> Result<Value, SupabaseError> {
        let url = self.config.rest_url(&format!("/rpc/{function}"));
        let req = self.http.post(url).json(params);
        let text = self.send(req, bearer).await?;
        parse_json_body(&text)
    }

    async fn send(&self, req: RequestBuilder, bearer: &str) -> Result<String, SupabaseError> {
        let response = req
            .header("apikey", self.anon_key())
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| SupabaseError::Request(e.to_string()))?;
        read_body(response).await
    }
}

async fn read_body(response: Response) -> Result<String, SupabaseError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| SupabaseError::Request(e.to_string()))?;
    if !status.is_success() {
        let message = extract_error_message(status.as_u16(), &text);
        tracing::debug!(status = status.as_u16(), %message, "backend returned error status");
        return Err(SupabaseError::Api { status: status.as_u16(), message });
    }
    Ok(text)
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Pull the human-readable message out of an auth or REST error body.
///
/// Auth errors use `msg` (newer) or `error_description` (older); REST errors
/// use `message`. Falls back to the raw body, then to the status code.
pub(crate) fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(Value::String(message)) = map.get(key) {
                if !message.is_empty() {
                    return message.clone();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("request failed with status {status}")
    } else {
        trimmed.to_owned()
    }
}

pub(crate) fn parse_session(body: &str) -> Result<Session, SupabaseError> {
    serde_json::from_str(body).map_err(|e| SupabaseError::Parse(format!("session: {e}")))
}

/// Empty bodies (void functions, `204 No Content`) decode as `null`.
pub(crate) fn parse_json_body(body: &str) -> Result<Value, SupabaseError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| SupabaseError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
