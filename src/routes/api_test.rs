use super::*;
use crate::state::test_helpers::test_app_state;

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn placeholder_defaults_and_headers() {
    let response = placeholder_image(Query(PlaceholderQuery::default()))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/svg+xml");
    assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "public, max-age=86400");
    assert!(body_string(response).await.contains("400 × 225"));
}

#[tokio::test]
async fn placeholder_honors_query() {
    let query = PlaceholderQuery { width: Some("100".into()), height: Some("50".into()) };
    let response = placeholder_image(Query(query)).await.into_response();
    assert!(body_string(response).await.contains("100 × 50"));
}

#[test]
fn access_code_status_mapping() {
    assert_eq!(access_code_status(&AccessCodeResult::ok(Some("ABC123".into()))), StatusCode::OK);
    assert_eq!(access_code_status(&AccessCodeResult::ok(None)), StatusCode::OK);
    assert_eq!(access_code_status(&AccessCodeResult::failed("boom")), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn public_config_exposes_url_and_anon_key() {
    let Json(value) = public_config(State(test_app_state())).await;
    assert_eq!(value["url"], "http://127.0.0.1:9");
    assert_eq!(value["anon_key"], "test-anon-key");
}
