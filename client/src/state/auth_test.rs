use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::transport::RequestBody;
use crate::testing::{json_response, sample_user, scripted_client};

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_no_user() {
    assert!(AuthState::default().user.is_none());
}

#[test]
fn auth_state_follows_session_events() {
    let mut state = AuthState::default();
    let user = sample_user("u1");
    state.apply(&SessionEvent::Started(user.clone()));
    assert_eq!(state.user.as_ref(), Some(&user));
    state.apply(&SessionEvent::Cleared);
    assert!(state.user.is_none());
}

#[test]
fn resolve_user_prefers_navigation_state() {
    let session = SessionStore::in_memory();
    session.begin(Some("tok"), &sample_user("stored"));
    assert_eq!(resolve_user(Some(sample_user("nav")), &session).unwrap().id, "nav");
    assert_eq!(resolve_user(None, &session).unwrap().id, "stored");
    assert_eq!(resolve_user(None, &SessionStore::in_memory()), None);
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_login_trims_email_and_requires_both() {
    assert_eq!(
        validate_login("  a@b.c ", "pw"),
        Ok(LoginRequest { email: "a@b.c".to_owned(), password: "pw".to_owned() })
    );
    assert!(validate_login("", "pw").is_err());
    assert!(validate_login("a@b.c", "").is_err());
}

#[test]
fn validate_register_requires_all_fields() {
    assert!(validate_register("ada", "a@b.c", "pw").is_ok());
    assert!(validate_register("  ", "a@b.c", "pw").is_err());
}

#[test]
fn validate_code_inputs() {
    assert_eq!(validate_send_code("   "), Err("Enter an email first."));
    assert_eq!(
        validate_verify_code(" a@b.c ", " 123456 "),
        Ok(VerifyCodeRequest { email: "a@b.c".to_owned(), security_code: "123456".to_owned() })
    );
    assert!(validate_verify_code("a@b.c", "").is_err());
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_persists_token_and_user() {
    let user = sample_user("u1");
    let api = scripted_client(vec![json_response(
        200,
        &json!({ "message": "Welcome back", "token": "jwt-1", "user": user }),
    )]);
    let resp = block_on(login(&api, &validate_login("u1@example.com", "pw").unwrap())).unwrap();
    assert_eq!(resp.message, "Welcome back");
    assert_eq!(api.session().token().as_deref(), Some("jwt-1"));
    assert_eq!(api.session().user(), Some(user));
}

#[test]
fn failed_login_leaves_storage_untouched() {
    let api = scripted_client(vec![json_response(401, &json!({ "message": "Invalid credentials" }))]);
    api.session().set_token("previous");
    let err = block_on(login(&api, &validate_login("a@b.c", "bad").unwrap())).unwrap_err();
    assert_eq!(err.notifications("Login failed"), vec!["Invalid credentials".to_owned()]);
    assert_eq!(api.session().token().as_deref(), Some("previous"));
    assert_eq!(api.session().user(), None);
}

// =============================================================
// Password reset
// =============================================================

#[test]
fn verify_code_stores_reset_id_fallback() {
    let api = scripted_client(vec![json_response(200, &json!({ "message": "Code verified", "user": { "_id": "u7" } }))]);
    let resp = block_on(verify_code(&api, &validate_verify_code("a@b.c", "123456").unwrap())).unwrap();
    assert_eq!(resp.user.id, "u7");
    assert_eq!(api.session().reset_id().as_deref(), Some("u7"));
}

#[test]
fn resolve_reset_id_prefers_navigation_then_storage() {
    let session = SessionStore::in_memory();
    assert_eq!(resolve_reset_id(None, &session), ResetTarget::RedirectToSendCode);
    assert_eq!(resolve_reset_id(Some(""), &session), ResetTarget::RedirectToSendCode);
    session.set_reset_id("stored");
    assert_eq!(resolve_reset_id(None, &session), ResetTarget::Proceed("stored".to_owned()));
    assert_eq!(resolve_reset_id(Some("nav"), &session), ResetTarget::Proceed("nav".to_owned()));
}

#[test]
fn reset_without_identifier_redirects_before_any_request() {
    let api = scripted_client(vec![json_response(200, &json!({ "message": "should not be used" }))]);
    let outcome = block_on(reset_password(&api, None, "new-pw", "new-pw")).unwrap();
    assert_eq!(outcome, ResetOutcome::Redirect("/send-code"));
    assert!(api.transport().requests().is_empty());
}

#[test]
fn reset_with_stored_identifier_submits_and_clears_it() {
    let api = scripted_client(vec![json_response(200, &json!({ "message": "Password reset" }))]);
    api.session().set_reset_id("u7");
    let outcome = block_on(reset_password(&api, None, "pw1", "pw1")).unwrap();
    assert_eq!(outcome, ResetOutcome::Done(MessageResponse { message: "Password reset".to_owned() }));

    let requests = api.transport().requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.ends_with("/reset-password"));
    assert_eq!(
        requests[0].body,
        RequestBody::Json(json!({ "password": "pw1", "confirmPassword": "pw1", "_id": "u7" }))
    );
    assert_eq!(api.session().reset_id(), None);
}

#[test]
fn rejected_reset_keeps_identifier_for_retry() {
    let api = scripted_client(vec![json_response(400, &json!({ "message": [{ "msg": "Passwords do not match" }] }))]);
    let err = block_on(reset_password(&api, Some("u7"), "a", "b")).unwrap_err();
    assert_eq!(err.notifications("Password reset failed"), vec!["Passwords do not match".to_owned()]);
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_sends_current_token_and_erases_every_key() {
    let api = scripted_client(vec![json_response(200, &json!({}))]);
    api.session().begin(Some("tok"), &sample_user("u1"));
    api.session().set_reset_id("u1");

    block_on(logout(&api));

    let requests = api.transport().requests();
    assert_eq!(requests[0].header("Authorization"), Some("Bearer tok"));
    assert_eq!(api.session().token(), None);
    assert_eq!(api.session().user(), None);
    assert_eq!(api.session().reset_id(), None);
}

#[test]
fn logout_clears_locally_even_when_request_fails() {
    let api = scripted_client(vec![Err("offline".to_owned())]);
    api.session().begin(Some("tok"), &sample_user("u1"));
    block_on(logout(&api));
    assert_eq!(api.session().token(), None);
}
