//! Action outcomes and redirect destinations.
//!
//! An action either hands a value back to its caller or ends with a terminal
//! navigation. The redirect is a variant, not an error, so nothing after it
//! can run by accident.

/// Pages an action may send the browser to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Login,
    AdminLogin,
    Dashboard,
    WaitlistConfirmation,
    Error,
}

impl Destination {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::AdminLogin => "/admin/login",
            Self::Dashboard => "/dashboard",
            Self::WaitlistConfirmation => "/waitlist-confirmation",
            Self::Error => "/error",
        }
    }
}

/// Result of a form action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    /// Hand a value back to the caller (typically a failure to display).
    Return(T),
    /// Leave the page. Terminal.
    Redirect(Destination),
}
