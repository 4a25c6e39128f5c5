//! JSON and asset API routes — access codes, placeholder images, public config.

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::services::access_code::{self, AccessCodeResult};
use crate::services::placeholder::{self, Dimensions, PlaceholderQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AccessCodeRequest {
    pub user_id: String,
}

pub(crate) fn access_code_status(result: &AccessCodeResult) -> StatusCode {
    if result.success { StatusCode::OK } else { StatusCode::BAD_GATEWAY }
}

/// `POST /api/access-codes` — mint or fetch the code for `user_id`.
pub async fn create_access_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<AccessCodeRequest>,
) -> impl IntoResponse {
    let client = state.server_client(&jar);
    tracing::debug!(user_id = %req.user_id, authenticated = client.has_user_token(), "access code requested");
    let result = access_code::generate(&client, &req.user_id, state.empty_code_policy).await;
    (access_code_status(&result), Json(result))
}

/// `GET /api/placeholder/{*dimensions}?width&height` — SVG placeholder.
///
/// Path segments are accepted for URL compatibility; only the query decides
/// the size.
pub async fn placeholder_image(Query(query): Query<PlaceholderQuery>) -> impl IntoResponse {
    let svg = placeholder::render_svg(Dimensions::from_query(&query));
    (
        [(header::CONTENT_TYPE, "image/svg+xml"), (header::CACHE_CONTROL, placeholder::CACHE_CONTROL)],
        svg,
    )
}

/// `GET /api/config/public` — values client-rendered code needs to build its
/// own anonymous client. Neither value is secret.
pub async fn public_config(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.transport.config();
    Json(serde_json::json!({ "url": config.url, "anon_key": config.anon_key }))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
