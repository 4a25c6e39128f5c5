use super::*;

#[test]
fn home_has_marketing_sections() {
    let html = home(false);
    for id in ["hero", "features", "testimonials", "faq"] {
        assert!(html.contains(&format!(r#"id="{id}""#)), "missing section {id}");
    }
    assert!(html.contains("Tournaments, handled | Arena Circuit"));
}

#[test]
fn nav_follows_session_state() {
    let anonymous = home(false);
    assert!(anonymous.contains(r#"href="/login""#));
    assert!(!anonymous.contains(r#"href="/dashboard""#));

    let member = home(true);
    assert!(member.contains(r#"href="/dashboard""#));
    assert!(member.contains(r#"action="/logout""#));
    assert!(!member.contains(r#"href="/login""#));
}

#[test]
fn login_escapes_error_and_email() {
    let html = login(
        LoginVariant::Player,
        false,
        Some("<b>Invalid login credentials</b>"),
        Some(r#"p1@arena.gg"><script>"#),
    );
    assert!(html.contains("&lt;b&gt;Invalid login credentials&lt;/b&gt;"));
    assert!(!html.contains("<b>Invalid"));
    assert!(!html.contains("<script>"));
    assert!(html.contains(r#"action="/login""#));
}

#[test]
fn login_keeps_plain_email_in_value() {
    let html = login(LoginVariant::Player, false, Some("Email and password are required"), Some("p1@arena.gg"));
    assert!(html.contains(r#"value="p1@arena.gg""#));
    assert!(html.contains(r#"<p role="alert">Email and password are required</p>"#));
}

#[test]
fn login_without_error_has_no_alert() {
    let html = login(LoginVariant::Player, false, None, None);
    assert!(!html.contains("role=\"alert\""));
    assert!(html.contains(r#"value="""#));
}

#[test]
fn admin_login_posts_to_same_action() {
    let html = login(LoginVariant::Admin, false, None, None);
    assert!(html.contains("Admin log in"));
    assert!(html.contains(r#"action="/login""#));
}

#[test]
fn signup_form_posts_to_signup() {
    let html = signup(false, Some("User already registered"), Some("new@arena.gg"));
    assert!(html.contains(r#"action="/signup""#));
    assert!(html.contains("User already registered"));
    assert!(html.contains(r#"value="new@arena.gg""#));
}

#[test]
fn error_outcome_links_to_login_and_home() {
    let html = outcome(Outcome::Error, false);
    assert!(html.contains(r#"<a href="/login">Back to login</a>"#));
    assert!(html.contains(r#"<a href="/">Go to the homepage</a>"#));
}

#[test]
fn pending_outcome_mentions_waitlist() {
    let html = outcome(Outcome::PendingApproval, false);
    assert!(html.contains("waitlist"));
    assert!(!html.contains("Back to login"));
}

#[test]
fn success_outcome_renders() {
    assert!(outcome(Outcome::Success, false).contains("Your request went through."));
}

#[test]
fn dashboard_and_admin_render_signed_in() {
    assert!(dashboard().contains(r#"action="/logout""#));
    assert!(admin().contains("/api/access-codes"));
    assert!(admin().contains(r#"action="/logout""#));
}
