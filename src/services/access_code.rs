//! Referral / access-code generation.
//!
//! One backend function call per request. Every failure, remote or local,
//! is folded into an [`AccessCodeResult`]; nothing propagates to the caller.

use serde::Serialize;
use serde_json::Value;

use crate::supabase::{SessionClient, SupabaseError};

pub const CREATE_ACCESS_CODE_FN: &str = "create_user_access_code";

/// JSON shape returned to callers: `{success, code?}` or `{success, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessCodeResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AccessCodeResult {
    #[must_use]
    pub fn ok(code: Option<String>) -> Self {
        Self { success: true, code, error: None }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, code: None, error: Some(error.into()) }
    }
}

/// What an empty result set means.
///
/// `ReportSuccess` keeps the long-standing behavior (success without a code),
/// which callers cannot tell apart from a real code being absent. `ReportError`
/// turns it into a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyCodePolicy {
    #[default]
    ReportSuccess,
    ReportError,
}

impl EmptyCodePolicy {
    /// Parse `ACCESS_CODE_EMPTY_POLICY` (`success` | `error`), defaulting to
    /// `success` when unset.
    ///
    /// # Errors
    ///
    /// Returns a message for unrecognized values.
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("" | "success") => Ok(Self::ReportSuccess),
            Some("error") => Ok(Self::ReportError),
            Some(other) => Err(format!(
                "unknown ACCESS_CODE_EMPTY_POLICY '{other}' (expected 'success' or 'error')"
            )),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let raw = std::env::var("ACCESS_CODE_EMPTY_POLICY").ok();
        Self::parse(raw.as_deref()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default empty-code policy");
            Self::default()
        })
    }

    fn on_empty(self) -> AccessCodeResult {
        match self {
            Self::ReportSuccess => AccessCodeResult::ok(None),
            Self::ReportError => AccessCodeResult::failed("no access code returned"),
        }
    }
}

/// `code` of the first row, if the function returned any rows.
///
/// Accepts both a row array and a bare object (functions declared to
/// return a single row).
#[must_use]
pub fn first_code(data: &Value) -> Option<Option<String>> {
    let row = match data {
        Value::Array(rows) => rows.first()?,
        Value::Object(_) => data,
        _ => return None,
    };
    Some(row.get("code").and_then(code_text))
}

fn code_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Mint or fetch the access code for `user_id`.
pub async fn generate(client: &dyn SessionClient, user_id: &str, policy: EmptyCodePolicy) -> AccessCodeResult {
    let params = serde_json::json!({ "user_id": user_id });
    match client.rpc(CREATE_ACCESS_CODE_FN, params).await {
        Ok(data) => match first_code(&data) {
            Some(code) => {
                tracing::info!(%user_id, has_code = code.is_some(), "access code generated");
                AccessCodeResult::ok(code)
            }
            None => {
                tracing::warn!(%user_id, ?policy, "access code function returned no rows");
                policy.on_empty()
            }
        },
        Err(e @ SupabaseError::Api { .. }) => {
            tracing::warn!(%user_id, error = %e, "access code function failed");
            AccessCodeResult::failed(e.to_string())
        }
        Err(e) => {
            tracing::error!(%user_id, error = %e, "access code call did not complete");
            AccessCodeResult::failed(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "access_code_test.rs"]
mod tests;
