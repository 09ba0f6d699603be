use super::*;

// =============================================================
// ServerMessage::parse
// =============================================================

#[test]
fn parse_plain_string_message() {
    assert_eq!(
        ServerMessage::parse(r#"{"message":"Invalid credentials"}"#),
        ServerMessage::Text("Invalid credentials".to_owned())
    );
}

#[test]
fn parse_field_error_array() {
    assert_eq!(
        ServerMessage::parse(r#"{"message":[{"msg":"Email required","path":"email"},{"msg":"Password too short"}]}"#),
        ServerMessage::Fields(vec!["Email required".to_owned(), "Password too short".to_owned()])
    );
}

#[test]
fn parse_skips_array_entries_without_msg() {
    assert_eq!(
        ServerMessage::parse(r#"{"message":[{"msg":"a"},{"text":"b"},7]}"#),
        ServerMessage::Fields(vec!["a".to_owned()])
    );
}

#[test]
fn parse_other_shapes_are_missing() {
    assert_eq!(ServerMessage::parse(r#"{"error":"x"}"#), ServerMessage::Missing);
    assert_eq!(ServerMessage::parse(r#"{"message":42}"#), ServerMessage::Missing);
    assert_eq!(ServerMessage::parse("<html>502</html>"), ServerMessage::Missing);
    assert_eq!(ServerMessage::parse(""), ServerMessage::Missing);
}

// =============================================================
// ApiError::notifications
// =============================================================

#[test]
fn field_array_yields_one_notification_per_entry() {
    let err = ApiError::from_status(400, r#"{"message":[{"msg":"Email required"}]}"#);
    assert_eq!(err.notifications("Login failed"), vec!["Email required".to_owned()]);

    let err = ApiError::from_status(400, r#"{"message":[{"msg":"a"},{"msg":"b"},{"msg":"c"}]}"#);
    assert_eq!(err.notifications("Login failed").len(), 3);
}

#[test]
fn plain_string_yields_exactly_one_notification() {
    let err = ApiError::from_status(401, r#"{"message":"Wrong password"}"#);
    assert_eq!(err.notifications("Login failed"), vec!["Wrong password".to_owned()]);
}

#[test]
fn unstructured_and_transport_failures_use_fallback() {
    let cases = [
        ApiError::from_status(500, "Internal Server Error"),
        ApiError::Transport("network down".to_owned()),
        ApiError::Encode("key must be a string".to_owned()),
        ApiError::Decode("expected value".to_owned()),
        ApiError::from_status(400, r#"{"message":[]}"#),
    ];
    for err in cases {
        assert_eq!(err.notifications("Login failed"), vec!["Login failed".to_owned()], "{err:?}");
    }
}

#[test]
fn status_is_reported_only_for_http_errors() {
    assert_eq!(ApiError::from_status(404, "").status(), Some(404));
    assert_eq!(ApiError::Transport("x".to_owned()).status(), None);
    assert_eq!(ApiError::Encode("x".to_owned()).status(), None);
}
