//! Backend types — credentials, sessions, table queries and errors.
//!
//! Shared by both session client variants and by the service layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by session client operations.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// A required configuration value is absent.
    #[error("missing configuration: env var {var} not set")]
    MissingConfig { var: String },

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP request to the backend failed (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status. `message` is the
    /// backend's own message, surfaced verbatim by `Display`.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The backend response body could not be decoded.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// AUTH
// =============================================================================

/// Email + password pair submitted once per sign-in. Never persisted.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated principal as reported by the auth endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session returned by a successful password sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

// =============================================================================
// TABLE QUERY
// =============================================================================

/// Column-equality lookup against one table, e.g.
/// `TableQuery::table("users").select("approved").eq("id", user_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub table: String,
    pub columns: String,
    pub filters: Vec<(String, String)>,
}

impl TableQuery {
    #[must_use]
    pub fn table(table: &str) -> Self {
        Self { table: table.to_owned(), columns: "*".to_owned(), filters: Vec::new() }
    }

    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        columns.clone_into(&mut self.columns);
        self
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_owned(), value.to_string()));
        self
    }

    /// Query-string pairs in PostgREST form (`col=eq.value`).
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_owned(), self.columns.clone())];
        pairs.extend(
            self.filters
                .iter()
                .map(|(column, value)| (column.clone(), format!("eq.{value}"))),
        );
        pairs
    }
}

// =============================================================================
// CLIENT TRAIT
// =============================================================================

/// Capability set shared by the browser- and server-context clients.
#[async_trait::async_trait]
pub trait SessionClient: Send + Sync {
    /// Password sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] carrying the backend message when the
    /// credentials are rejected, or a transport/parse variant otherwise.
    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, SupabaseError>;

    /// Create an account. The backend decides whether confirmation is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the signup or is unreachable.
    async fn sign_up(&self, credentials: &Credentials) -> Result<(), SupabaseError>;

    /// Revoke the current session, if the client holds one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    async fn sign_out(&self) -> Result<(), SupabaseError>;

    /// Single-row lookup. A missing row is an [`SupabaseError::Api`] error.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or matches no single row.
    async fn select_single(&self, query: &TableQuery) -> Result<serde_json::Value, SupabaseError>;

    /// Invoke a named backend function with a JSON params object.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the body is not JSON.
    async fn rpc(&self, function: &str, params: serde_json::Value) -> Result<serde_json::Value, SupabaseError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
