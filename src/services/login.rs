//! Login, signup and logout actions.
//!
//! ARCHITECTURE
//! ============
//! Each action takes a [`SessionClient`] so routes can hand in the
//! request-scoped client and tests can hand in a mock. The login flow is
//! strictly sequenced: credential check first, approval lookup only after a
//! session exists. Approval is read, never written; the `users` table belongs
//! to the backend.

use serde::Deserialize;
use serde_json::Value;

use super::navigation::{ActionOutcome, Destination};
use super::page_cache::PageCache;
use crate::supabase::{Credentials, SessionClient, TableQuery};

const USERS_TABLE: &str = "users";
const APPROVED_COLUMN: &str = "approved";

/// Raw form submission. Fields are optional so absent inputs reach
/// validation instead of failing deserialization.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[cfg(test)]
impl LoginForm {
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self { email: Some(email.to_owned()), password: Some(password.to_owned()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Email and password are required")]
    MissingCredentials,
    /// Backend message, verbatim.
    #[error("{0}")]
    Upstream(String),
}

impl LoginError {
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingCredentials)
    }
}

/// Both fields present and non-empty; the email is trimmed.
///
/// # Errors
///
/// Returns [`LoginError::MissingCredentials`] when either field is absent or empty.
pub fn validate(form: &LoginForm) -> Result<Credentials, LoginError> {
    let email = form.email.as_deref().map(str::trim).unwrap_or_default();
    let password = form.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Truthiness of the `approved` column. Null and absent are false.
#[must_use]
pub fn is_approved(row: &Value) -> bool {
    match row.get(APPROVED_COLUMN) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n.abs() > 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    }
}

/// Authenticate, then route on the approval flag.
///
/// Failures come back as [`ActionOutcome::Return`]; both success paths end in
/// a redirect. Only the approved path invalidates the layout cache.
pub async fn login(client: &dyn SessionClient, cache: &PageCache, form: &LoginForm) -> ActionOutcome<LoginError> {
    let credentials = match validate(form) {
        Ok(c) => c,
        Err(e) => return ActionOutcome::Return(e),
    };

    let session = match client.sign_in_with_password(&credentials).await {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(email = %credentials.email, error = %e, "sign-in rejected");
            return ActionOutcome::Return(LoginError::Upstream(e.to_string()));
        }
    };
    let user_id = session.user.id;

    let query = TableQuery::table(USERS_TABLE)
        .select(APPROVED_COLUMN)
        .eq("id", user_id);
    let approved = match client.select_single(&query).await {
        Ok(row) => is_approved(&row),
        Err(e) => {
            tracing::warn!(%user_id, error = %e, "approval lookup failed, treating as unapproved");
            false
        }
    };

    if !approved {
        tracing::info!(%user_id, "login deferred to waitlist");
        return ActionOutcome::Redirect(Destination::WaitlistConfirmation);
    }

    cache.invalidate_layout("/");
    tracing::info!(%user_id, email = ?session.user.email, "login approved");
    ActionOutcome::Redirect(Destination::Dashboard)
}

/// Create an account. New accounts wait for approval.
pub async fn signup(client: &dyn SessionClient, form: &LoginForm) -> ActionOutcome<LoginError> {
    let credentials = match validate(form) {
        Ok(c) => c,
        Err(e) => return ActionOutcome::Return(e),
    };

    match client.sign_up(&credentials).await {
        Ok(()) => {
            tracing::info!(email = %credentials.email, "signup accepted");
            ActionOutcome::Redirect(Destination::WaitlistConfirmation)
        }
        Err(e) => {
            tracing::error!(email = %credentials.email, error = %e, "signup failed");
            ActionOutcome::Redirect(Destination::Error)
        }
    }
}

/// Revoke the session (best effort) and send the user home.
pub async fn logout(client: &dyn SessionClient, cache: &PageCache) -> Destination {
    if let Err(e) = client.sign_out().await {
        tracing::warn!(error = %e, "sign-out failed, clearing cookies anyway");
    }
    cache.invalidate_layout("/");
    Destination::Home
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
