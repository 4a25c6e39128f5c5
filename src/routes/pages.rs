//! Page routes — marketing, forms, outcome pages and the gated areas.
//!
//! Static pages go through the page cache, one render per path and session
//! state. Gated pages only check that a session cookie exists: login writes
//! that cookie for approved users alone, and token validity is the backend's
//! call on the next data request.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::auth::has_session;
use crate::pages::{self, LoginVariant, Outcome};
use crate::services::navigation::Destination;
use crate::state::AppState;

/// Cache key for `path` as seen by this visitor.
pub(crate) fn cache_key(path: &str, signed_in: bool) -> String {
    if signed_in { format!("{path}?member") } else { path.to_owned() }
}

fn cached(state: &AppState, jar: &CookieJar, path: &str, render: impl FnOnce(bool) -> String) -> Html<String> {
    let signed_in = has_session(jar);
    let page = state
        .pages
        .get_or_render(&cache_key(path, signed_in), || render(signed_in));
    Html(page.to_string())
}

/// `GET /`
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    cached(&state, &jar, "/", pages::home)
}

/// `GET /login`
pub async fn login(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    cached(&state, &jar, "/login", |signed_in| {
        pages::login(LoginVariant::Player, signed_in, None, None)
    })
}

/// `GET /admin/login`
pub async fn admin_login(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    cached(&state, &jar, "/admin/login", |signed_in| {
        pages::login(LoginVariant::Admin, signed_in, None, None)
    })
}

/// `GET /signup`
pub async fn signup(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    cached(&state, &jar, "/signup", |signed_in| pages::signup(signed_in, None, None))
}

/// `GET /waitlist-confirmation`
pub async fn waitlist_confirmation(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    cached(&state, &jar, "/waitlist-confirmation", |signed_in| {
        pages::outcome(Outcome::PendingApproval, signed_in)
    })
}

/// `GET /success`
pub async fn success(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    cached(&state, &jar, "/success", |signed_in| pages::outcome(Outcome::Success, signed_in))
}

/// `GET /error`
pub async fn error(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    cached(&state, &jar, "/error", |signed_in| pages::outcome(Outcome::Error, signed_in))
}

/// `GET /dashboard` — requires a session cookie.
pub async fn dashboard(jar: CookieJar) -> Response {
    if !has_session(&jar) {
        return Redirect::temporary(Destination::Login.path()).into_response();
    }
    Html(pages::dashboard()).into_response()
}

/// `GET /admin` — requires a session cookie.
pub async fn admin(jar: CookieJar) -> Response {
    if !has_session(&jar) {
        return Redirect::temporary(Destination::AdminLogin.path()).into_response();
    }
    Html(pages::admin()).into_response()
}
