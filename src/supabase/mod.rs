//! Session clients for the hosted auth + database backend.
//!
//! DESIGN
//! ======
//! One capability trait ([`SessionClient`]) with two implementations that
//! share a pooled [`Transport`] and differ only in how credentials are
//! attached to outgoing calls:
//!
//! - [`BrowserClient`] always authorizes with the public anonymous key. It is
//!   the variant for code paths that act on behalf of nobody in particular.
//! - [`ServerClient`] is built per request from the cookie jar. It authorizes
//!   with the user's access token when one is present and adopts the session
//!   produced by a sign-in, so later calls in the same request run as the
//!   freshly authenticated user (row-level policies see the right principal).
//!
//! Neither variant caches anything across requests.

pub mod config;
pub mod transport;
pub mod types;

use std::sync::Mutex;

use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::Value;

pub use config::SupabaseConfig;
pub use transport::Transport;
pub use types::{AuthUser, Credentials, Session, SessionClient, SupabaseError, TableQuery};

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";

// =============================================================================
// BROWSER CONTEXT
// =============================================================================

/// Anonymous-key client.
#[derive(Clone)]
pub struct BrowserClient {
    transport: Transport,
}

impl BrowserClient {
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait::async_trait]
impl SessionClient for BrowserClient {
    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, SupabaseError> {
        self.transport.sign_in_with_password(credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<(), SupabaseError> {
        self.transport.sign_up(credentials).await
    }

    async fn sign_out(&self) -> Result<(), SupabaseError> {
        // Nothing to revoke: this client never holds a user session.
        Ok(())
    }

    async fn select_single(&self, query: &TableQuery) -> Result<Value, SupabaseError> {
        self.transport
            .select_single(query, self.transport.anon_key())
            .await
    }

    async fn rpc(&self, function: &str, params: Value) -> Result<Value, SupabaseError> {
        self.transport
            .rpc(function, &params, self.transport.anon_key())
            .await
    }
}

// =============================================================================
// SERVER CONTEXT
// =============================================================================

/// Request-scoped client carrying the caller's session.
pub struct ServerClient {
    transport: Transport,
    access_token: Mutex<Option<String>>,
    session: Mutex<Option<Session>>,
}

impl ServerClient {
    #[must_use]
    pub fn new(transport: Transport, access_token: Option<String>) -> Self {
        Self { transport, access_token: Mutex::new(access_token), session: Mutex::new(None) }
    }

    /// Pick up the access token cookie, if the browser sent one.
    #[must_use]
    pub fn from_cookies(transport: Transport, jar: &CookieJar) -> Self {
        let token = jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(Cookie::value)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);
        Self::new(transport, token)
    }

    /// Whether calls are currently authorized as a user rather than anonymously.
    #[must_use]
    pub fn has_user_token(&self) -> bool {
        self.token_slot().is_some()
    }

    /// Session adopted by the last successful sign-in in this request.
    #[must_use]
    pub fn take_session(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
    }

    fn token_slot(&self) -> Option<String> {
        self.access_token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn bearer(&self) -> String {
        self.token_slot()
            .unwrap_or_else(|| self.transport.anon_key().to_owned())
    }

    fn adopt(&self, session: &Session) {
        *self
            .access_token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(session.access_token.clone());
        *self
            .session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(session.clone());
    }
}

#[async_trait::async_trait]
impl SessionClient for ServerClient {
    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, SupabaseError> {
        let session = self
            .transport
            .sign_in_with_password(credentials)
            .await?;
        self.adopt(&session);
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<(), SupabaseError> {
        self.transport.sign_up(credentials).await
    }

    async fn sign_out(&self) -> Result<(), SupabaseError> {
        let token = self
            .access_token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        match token {
            Some(token) => self.transport.sign_out(&token).await,
            None => Ok(()),
        }
    }

    async fn select_single(&self, query: &TableQuery) -> Result<Value, SupabaseError> {
        let bearer = self.bearer();
        self.transport.select_single(query, &bearer).await
    }

    async fn rpc(&self, function: &str, params: Value) -> Result<Value, SupabaseError> {
        let bearer = self.bearer();
        self.transport.rpc(function, &params, &bearer).await
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
