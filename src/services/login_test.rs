use super::*;
use crate::state::test_helpers::{MockClient, Reply};
use serde_json::json;

fn warm_cache() -> PageCache {
    let cache = PageCache::new();
    cache.get_or_render("/", || "home".into());
    cache
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn validate_trims_email_and_keeps_password() {
    let creds = validate(&LoginForm::new("  p1@arena.gg ", " pw ")).unwrap();
    assert_eq!(creds.email, "p1@arena.gg");
    assert_eq!(creds.password, " pw ");
}

#[test]
fn validate_rejects_absent_and_empty_fields() {
    let cases = [
        LoginForm::default(),
        LoginForm { email: Some("p1@arena.gg".into()), password: None },
        LoginForm { email: None, password: Some("pw".into()) },
        LoginForm::new("", "pw"),
        LoginForm::new("   ", "pw"),
        LoginForm::new("p1@arena.gg", ""),
    ];
    for form in cases {
        assert_eq!(validate(&form).unwrap_err(), LoginError::MissingCredentials, "{form:?}");
    }
}

// =============================================================================
// is_approved
// =============================================================================

#[test]
fn approval_truthiness() {
    assert!(is_approved(&json!({ "approved": true })));
    assert!(is_approved(&json!({ "approved": 1 })));
    assert!(is_approved(&json!({ "approved": -1 })));
    assert!(is_approved(&json!({ "approved": 1e-20 })));
    assert!(is_approved(&json!({ "approved": u64::MAX })));
    assert!(!is_approved(&json!({ "approved": false })));
    assert!(!is_approved(&json!({ "approved": null })));
    assert!(!is_approved(&json!({ "approved": 0 })));
    assert!(!is_approved(&json!({ "approved": 0.0 })));
    assert!(!is_approved(&json!({ "approved": -0.0 })));
    assert!(!is_approved(&json!({ "approved": "" })));
    assert!(!is_approved(&json!({})));
    assert!(!is_approved(&serde_json::Value::Null));
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn missing_fields_fail_without_network_calls() {
    let client = MockClient::new();
    let cache = warm_cache();
    for form in [LoginForm::default(), LoginForm::new("", "pw"), LoginForm::new("p1@arena.gg", "")] {
        let outcome = login(&client, &cache, &form).await;
        assert_eq!(outcome, ActionOutcome::Return(LoginError::MissingCredentials));
    }
    assert!(client.calls().is_empty());
    assert_eq!(cache.invalidation_count(), 0);
}

#[tokio::test]
async fn upstream_auth_error_is_returned_verbatim() {
    let mut client = MockClient::new();
    client.sign_in = Reply::Api(400, "Invalid login credentials".into());
    let cache = warm_cache();

    let outcome = login(&client, &cache, &LoginForm::new("p1@arena.gg", "wrong")).await;

    assert_eq!(outcome, ActionOutcome::Return(LoginError::Upstream("Invalid login credentials".into())));
    assert_eq!(client.calls(), vec!["sign_in:p1@arena.gg".to_owned()]);
    assert!(cache.contains("/"));
}

#[tokio::test]
async fn transport_error_is_returned_not_redirected() {
    let mut client = MockClient::new();
    client.sign_in = Reply::Transport("connection refused".into());
    let cache = PageCache::new();

    let outcome = login(&client, &cache, &LoginForm::new("p1@arena.gg", "pw")).await;

    match outcome {
        ActionOutcome::Return(LoginError::Upstream(message)) => assert!(message.contains("connection refused")),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn unapproved_user_goes_to_waitlist_without_invalidation() {
    let mut client = MockClient::new();
    client.lookup = Reply::Ok(json!({ "approved": false }));
    let cache = warm_cache();

    let outcome = login(&client, &cache, &LoginForm::new("p1@arena.gg", "pw")).await;

    assert_eq!(outcome, ActionOutcome::Redirect(Destination::WaitlistConfirmation));
    assert_eq!(cache.invalidation_count(), 0);
    assert!(cache.contains("/"));
}

#[tokio::test]
async fn missing_approved_field_goes_to_waitlist() {
    let mut client = MockClient::new();
    client.lookup = Reply::Ok(json!({}));
    let cache = warm_cache();

    let outcome = login(&client, &cache, &LoginForm::new("p1@arena.gg", "pw")).await;

    assert_eq!(outcome, ActionOutcome::Redirect(Destination::WaitlistConfirmation));
    assert_eq!(cache.invalidation_count(), 0);
}

#[tokio::test]
async fn failed_lookup_goes_to_waitlist() {
    let mut client = MockClient::new();
    client.lookup = Reply::Api(406, "JSON object requested, multiple (or no) rows returned".into());
    let cache = warm_cache();

    let outcome = login(&client, &cache, &LoginForm::new("p1@arena.gg", "pw")).await;

    assert_eq!(outcome, ActionOutcome::Redirect(Destination::WaitlistConfirmation));
    assert_eq!(cache.invalidation_count(), 0);
}

#[tokio::test]
async fn approved_user_invalidates_layout_and_goes_to_dashboard() {
    let client = MockClient::new();
    let cache = warm_cache();

    let outcome = login(&client, &cache, &LoginForm::new("p1@arena.gg", "pw")).await;

    assert_eq!(outcome, ActionOutcome::Redirect(Destination::Dashboard));
    assert_eq!(cache.invalidation_count(), 1);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn approval_lookup_follows_sign_in_and_targets_user_row() {
    let client = MockClient::new();
    let cache = PageCache::new();

    let _ = login(&client, &cache, &LoginForm::new("p1@arena.gg", "pw")).await;

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], "sign_in:p1@arena.gg");
    assert_eq!(calls[1], format!("select:users:approved:id={}", uuid::Uuid::nil()));
}

// =============================================================================
// signup / logout
// =============================================================================

#[tokio::test]
async fn signup_validates_before_calling_backend() {
    let client = MockClient::new();
    let outcome = signup(&client, &LoginForm::new("p1@arena.gg", "")).await;
    assert_eq!(outcome, ActionOutcome::Return(LoginError::MissingCredentials));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn signup_success_goes_to_waitlist() {
    let client = MockClient::new();
    let outcome = signup(&client, &LoginForm::new("new@arena.gg", "hunter22")).await;
    assert_eq!(outcome, ActionOutcome::Redirect(Destination::WaitlistConfirmation));
    assert_eq!(client.calls(), vec!["sign_up:new@arena.gg".to_owned()]);
}

#[tokio::test]
async fn signup_failure_goes_to_error_page() {
    let mut client = MockClient::new();
    client.sign_up = Reply::Api(422, "User already registered".into());
    let outcome = signup(&client, &LoginForm::new("p1@arena.gg", "pw")).await;
    assert_eq!(outcome, ActionOutcome::Redirect(Destination::Error));
}

#[tokio::test]
async fn logout_signs_out_and_invalidates() {
    let client = MockClient::new();
    let cache = warm_cache();
    let dest = logout(&client, &cache).await;
    assert_eq!(dest, Destination::Home);
    assert_eq!(client.calls(), vec!["sign_out".to_owned()]);
    assert!(cache.is_empty());
}
