//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the marketing pages, the auth form actions, and the small JSON/asset
//! API under a single Axum router. Every handler builds its own backend
//! client from the request; the router itself holds no per-user state.

pub mod api;
pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login).post(auth::login_form))
        .route("/admin/login", get(pages::admin_login))
        .route("/signup", get(pages::signup).post(auth::signup))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(pages::dashboard))
        .route("/admin", get(pages::admin))
        .route("/waitlist-confirmation", get(pages::waitlist_confirmation))
        .route("/success", get(pages::success))
        .route("/error", get(pages::error))
        .route("/api/auth/login", post(auth::login_json))
        .route("/api/access-codes", post(api::create_access_code))
        .route("/api/placeholder", get(api::placeholder_image))
        .route("/api/placeholder/{*dimensions}", get(api::placeholder_image))
        .route("/api/config/public", get(api::public_config))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
