use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::types::Avatar;
use crate::testing::{TEST_BACKEND, fake_backend_client, json_response, sample_user, scripted_client};

fn png() -> AvatarUpload {
    AvatarUpload { file_name: "me.png".to_owned(), content_type: "image/png".to_owned(), bytes: vec![137, 80, 78, 71] }
}

// =============================================================
// Bio
// =============================================================

#[test]
fn remaining_chars_counts_down_to_zero() {
    assert_eq!(remaining_bio_chars(""), 200);
    assert_eq!(remaining_bio_chars("hello"), 195);
    assert_eq!(remaining_bio_chars(&"x".repeat(250)), 0);
}

#[test]
fn clamp_bio_counts_characters_not_bytes() {
    let long = "é".repeat(210);
    let clamped = clamp_bio(&long);
    assert_eq!(clamped.chars().count(), BIO_LIMIT);
    assert_eq!(clamp_bio("short"), "short");
}

// =============================================================
// Avatar source
// =============================================================

#[test]
fn avatar_source_uses_backend_when_data_present() {
    let mut user = sample_user("u1");
    user.avatar = Some(Avatar { data: Some(json!({ "type": "Buffer", "data": [1] })), content_type: None });
    let config = ClientConfig::new(TEST_BACKEND);
    assert_eq!(avatar_source(&config, &user, 42), "http://backend.test/user/avatar/u1?t=42");
}

#[test]
fn avatar_source_falls_back_to_initials() {
    let mut user = sample_user("u1");
    user.username = "Ada Lovelace".to_owned();
    let config = ClientConfig::new(TEST_BACKEND);
    assert_eq!(
        avatar_source(&config, &user, 1),
        "https://ui-avatars.com/api/?name=Ada%20Lovelace&background=0D8ABC&color=fff&size=128"
    );
}

#[test]
fn avatar_source_null_data_and_blank_name() {
    let mut user = sample_user("u1");
    user.username.clear();
    user.avatar = Some(Avatar { data: Some(serde_json::Value::Null), content_type: Some("image/png".to_owned()) });
    let src = avatar_source(&ClientConfig::new(TEST_BACKEND), &user, 1);
    assert!(src.contains("name=User&"));
}

// =============================================================
// Form
// =============================================================

#[test]
fn form_without_avatar_has_two_text_fields() {
    let form = build_profile_form("u1", "hi", None);
    assert_eq!(
        form,
        vec![
            FormPart::Text { name: "_id".to_owned(), value: "u1".to_owned() },
            FormPart::Text { name: "bio".to_owned(), value: "hi".to_owned() },
        ]
    );
}

#[test]
fn form_with_avatar_appends_file_part() {
    let form = build_profile_form("u1", "hi", Some(png()));
    assert_eq!(form.len(), 3);
    let FormPart::File { name, file } = &form[2] else {
        panic!("expected file part");
    };
    assert_eq!(name, "avatar");
    assert_eq!(file.file_name, "me.png");
    assert_eq!(file.bytes, png().bytes);
}

#[test]
fn profile_update_round_trip_reports_avatar() {
    let api = fake_backend_client();
    let resp = block_on(api.update_profile(build_profile_form("u1", "new bio", Some(png())))).unwrap();
    let user = resp.user.unwrap();
    assert_eq!(user.bio.as_deref(), Some("new bio"));
    assert!(user.has_avatar());
    assert!(avatar_source(api.config(), &user, 7).ends_with("/user/avatar/u1?t=7"));
}

// =============================================================
// Update flow
// =============================================================

#[test]
fn successful_update_replaces_stored_user() {
    let api = fake_backend_client();
    api.session().set_user(&sample_user("u1"));

    let resp = block_on(update_profile(&api, "u1", "fresh bio", Some(png()))).unwrap();
    let stored = api.session().user().unwrap();
    assert_eq!(Some(&stored), resp.user.as_ref());
    assert_eq!(stored.bio.as_deref(), Some("fresh bio"));
    assert!(stored.has_avatar());
}

#[test]
fn rejected_update_leaves_stored_user_alone() {
    let api = scripted_client(vec![json_response(400, &json!({ "message": "Bio too long" }))]);
    let before = sample_user("u1");
    api.session().set_user(&before);

    let err = block_on(update_profile(&api, "u1", "new bio", None)).unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.notifications("Update failed"), ["Bio too long"]);
    assert_eq!(api.session().user(), Some(before));
}
