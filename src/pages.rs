//! Server-rendered HTML pages.
//!
//! Each page is an askama template under `templates/` extending
//! `layout.html`. The layout nav switches on `signed_in`; callers caching a
//! render key it by session state.

use askama::Template;

use crate::services::navigation::Destination;

const FALLBACK_HTML: &str = "<!doctype html><title>Arena Circuit</title><p>Something went wrong.</p>";

fn render(page: &impl Template) -> String {
    page.render().unwrap_or_else(|e| {
        tracing::error!(error = %e, "page render failed");
        FALLBACK_HTML.to_owned()
    })
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomePage {
    signed_in: bool,
}

#[must_use]
pub fn home(signed_in: bool) -> String {
    render(&HomePage { signed_in })
}

/// Which entry point rendered the login form. Both post to the same action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginVariant {
    Player,
    Admin,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginPage<'a> {
    signed_in: bool,
    heading: &'a str,
    error: Option<&'a str>,
    email: &'a str,
}

/// Login form, optionally re-rendered with the failure and the typed email.
#[must_use]
pub fn login(variant: LoginVariant, signed_in: bool, error: Option<&str>, email: Option<&str>) -> String {
    let heading = match variant {
        LoginVariant::Player => "Log in",
        LoginVariant::Admin => "Admin log in",
    };
    render(&LoginPage { signed_in, heading, error, email: email.unwrap_or_default() })
}

#[derive(Template)]
#[template(path = "signup.html")]
struct SignupPage<'a> {
    signed_in: bool,
    error: Option<&'a str>,
    email: &'a str,
}

#[must_use]
pub fn signup(signed_in: bool, error: Option<&str>, email: Option<&str>) -> String {
    render(&SignupPage { signed_in, error, email: email.unwrap_or_default() })
}

/// Fixed terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    PendingApproval,
    Error,
}

struct Link {
    label: &'static str,
    destination: Destination,
}

const HOME_ONLY: &[Link] = &[Link { label: "Go to the homepage", destination: Destination::Home }];
const LOGIN_OR_HOME: &[Link] = &[
    Link { label: "Back to login", destination: Destination::Login },
    Link { label: "Go to the homepage", destination: Destination::Home },
];

#[derive(Template)]
#[template(path = "outcome.html")]
struct OutcomePage {
    signed_in: bool,
    heading: &'static str,
    message: &'static str,
    links: &'static [Link],
}

#[must_use]
pub fn outcome(kind: Outcome, signed_in: bool) -> String {
    let (heading, message, links) = match kind {
        Outcome::Success => ("You're all set", "Your request went through.", HOME_ONLY),
        Outcome::PendingApproval => (
            "You're on the waitlist",
            "Thanks for signing up. We approve new players in batches and will email you once your account is active.",
            HOME_ONLY,
        ),
        Outcome::Error => (
            "Something went wrong",
            "We couldn't complete that request. Please try again.",
            LOGIN_OR_HOME,
        ),
    };
    render(&OutcomePage { signed_in, heading, message, links })
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage {
    signed_in: bool,
}

/// Gated; only rendered for a signed-in visitor.
#[must_use]
pub fn dashboard() -> String {
    render(&DashboardPage { signed_in: true })
}

#[derive(Template)]
#[template(path = "admin.html")]
struct AdminPage {
    signed_in: bool,
}

#[must_use]
pub fn admin() -> String {
    render(&AdminPage { signed_in: true })
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
