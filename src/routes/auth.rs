//! Auth routes — login, signup, logout, session cookies.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::pages::{self, LoginVariant};
use crate::services::login::{self, LoginError, LoginForm};
use crate::services::navigation::{ActionOutcome, Destination};
use crate::supabase::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, Session};
use crate::state::AppState;

const DEFAULT_ACCESS_TOKEN_SECS: i64 = 3600;
const REFRESH_TOKEN_DAYS: i64 = 30;

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// `COOKIE_SECURE` when set, otherwise inferred from `SITE_URL` being https.
pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("SITE_URL")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(name: &'static str, value: String, secure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

/// Persist a freshly adopted session so later requests run as the user.
pub(crate) fn with_session_cookies(jar: CookieJar, session: Option<Session>, secure: bool) -> CookieJar {
    let Some(session) = session else {
        return jar;
    };
    let access_age = Duration::seconds(session.expires_in.unwrap_or(DEFAULT_ACCESS_TOKEN_SECS));
    let mut jar = jar.add(session_cookie(ACCESS_TOKEN_COOKIE, session.access_token, secure, access_age));
    if let Some(refresh) = session.refresh_token {
        jar = jar.add(session_cookie(REFRESH_TOKEN_COOKIE, refresh, secure, Duration::days(REFRESH_TOKEN_DAYS)));
    }
    jar
}

pub(crate) fn clear_session_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_TOKEN_COOKIE, String::new(), secure, Duration::ZERO))
        .add(session_cookie(REFRESH_TOKEN_COOKIE, String::new(), secure, Duration::ZERO))
}

pub(crate) fn has_session(jar: &CookieJar) -> bool {
    jar.get(ACCESS_TOKEN_COOKIE)
        .is_some_and(|c| !c.value().is_empty())
}

pub(crate) fn login_error_status(err: &LoginError) -> StatusCode {
    if err.is_validation() { StatusCode::BAD_REQUEST } else { StatusCode::UNAUTHORIZED }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Run the login action with the caller's cookies.
///
/// The session is persisted only when the user was approved; a waitlisted
/// sign-in leaves the jar as it was.
async fn run_login(state: &AppState, jar: CookieJar, form: &LoginForm) -> (CookieJar, ActionOutcome<LoginError>) {
    let client = state.server_client(&jar);
    let outcome = login::login(&client, &state.pages, form).await;
    let session = match &outcome {
        ActionOutcome::Redirect(Destination::Dashboard) => client.take_session(),
        _ => None,
    };
    (with_session_cookies(jar, session, state.cookie_secure), outcome)
}

/// `POST /login` — form login; failures re-render the form with the message.
pub async fn login_form(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let (jar, outcome) = run_login(&state, jar, &form).await;
    match outcome {
        ActionOutcome::Redirect(dest) => (jar, Redirect::to(dest.path())).into_response(),
        ActionOutcome::Return(err) => {
            let html = pages::login(LoginVariant::Player, has_session(&jar), Some(&err.to_string()), form.email.as_deref());
            (login_error_status(&err), jar, Html(html)).into_response()
        }
    }
}

/// `POST /api/auth/login` — JSON login; failures come back as `{error}`.
pub async fn login_json(State(state): State<AppState>, jar: CookieJar, Json(form): Json<LoginForm>) -> Response {
    let (jar, outcome) = run_login(&state, jar, &form).await;
    match outcome {
        ActionOutcome::Redirect(dest) => (jar, Redirect::to(dest.path())).into_response(),
        ActionOutcome::Return(err) => {
            let body = serde_json::json!({ "error": err.to_string() });
            (login_error_status(&err), jar, Json(body)).into_response()
        }
    }
}

/// `POST /signup` — create an account through the anonymous client.
pub async fn signup(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let client = state.browser_client();
    match login::signup(&client, &form).await {
        ActionOutcome::Redirect(dest) => Redirect::to(dest.path()).into_response(),
        ActionOutcome::Return(err) => {
            let html = pages::signup(has_session(&jar), Some(&err.to_string()), form.email.as_deref());
            (login_error_status(&err), Html(html)).into_response()
        }
    }
}

/// `POST /logout` — revoke, clear cookies, go home.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let client = state.server_client(&jar);
    let dest = login::logout(&client, &state.pages).await;
    let jar = clear_session_cookies(jar, state.cookie_secure);
    (jar, Redirect::to(dest.path()))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
