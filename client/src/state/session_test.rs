use std::sync::Arc;
use std::sync::Mutex;

use super::*;
use crate::testing::sample_user;

fn store_with_storage() -> (SessionStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::default());
    (SessionStore::new(storage.clone()), storage)
}

// =============================================================
// Token and user record
// =============================================================

#[test]
fn empty_store_has_no_session() {
    let store = SessionStore::in_memory();
    assert_eq!(store.token(), None);
    assert_eq!(store.user(), None);
    assert_eq!(store.reset_id(), None);
}

#[test]
fn begin_persists_token_and_user_under_fixed_keys() {
    let (store, storage) = store_with_storage();
    let user = sample_user("u1");
    store.begin(Some("tok-1"), &user);

    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    let raw = storage.get(USER_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["_id"], "u1");
    assert_eq!(store.user(), Some(user));
}

#[test]
fn begin_without_token_keeps_previous_token() {
    let store = SessionStore::in_memory();
    store.set_token("old");
    store.begin(None, &sample_user("u1"));
    assert_eq!(store.token().as_deref(), Some("old"));
}

#[test]
fn empty_token_reads_as_absent() {
    let store = SessionStore::in_memory();
    store.set_token("");
    assert_eq!(store.token(), None);
}

#[test]
fn unreadable_user_record_reads_as_absent() {
    let (store, storage) = store_with_storage();
    storage.set(USER_KEY, "{not json");
    assert_eq!(store.user(), None);
}

#[test]
fn clear_removes_token_and_user_but_keeps_reset_id() {
    let store = SessionStore::in_memory();
    store.begin(Some("tok"), &sample_user("u1"));
    store.set_reset_id("u1");
    store.clear();
    assert_eq!(store.token(), None);
    assert_eq!(store.user(), None);
    assert_eq!(store.reset_id().as_deref(), Some("u1"));
}

#[test]
fn end_removes_reset_id_too() {
    let store = SessionStore::in_memory();
    store.begin(Some("tok"), &sample_user("u1"));
    store.set_reset_id("u1");
    store.end();
    assert_eq!(store.token(), None);
    assert_eq!(store.user(), None);
    assert_eq!(store.reset_id(), None);
}

// =============================================================
// Reset identifier
// =============================================================

#[test]
fn reset_id_is_stored_json_encoded() {
    let (store, storage) = store_with_storage();
    store.set_reset_id("abc123");
    assert_eq!(storage.get(RESET_ID_KEY).as_deref(), Some("\"abc123\""));
    assert_eq!(store.reset_id().as_deref(), Some("abc123"));
}

#[test]
fn reset_id_rejects_unencoded_value() {
    let (store, storage) = store_with_storage();
    storage.set(RESET_ID_KEY, "abc123");
    assert_eq!(store.reset_id(), None);
}

// =============================================================
// Subscriptions
// =============================================================

#[test]
fn subscribers_see_lifecycle_events_in_order() {
    let store = SessionStore::in_memory();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let user = sample_user("u1");
    store.begin(Some("tok"), &user);
    store.set_user(&user);
    store.clear();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![SessionEvent::Started(user.clone()), SessionEvent::UserChanged(user), SessionEvent::Cleared]
    );
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let store = SessionStore::in_memory();
    let calls = Arc::new(Mutex::new(0_u32));
    let sink = calls.clone();
    let sub = store.subscribe(move |_| *sink.lock().unwrap() += 1);
    store.clear();
    store.unsubscribe(sub);
    store.clear();
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn listener_may_read_store_during_event() {
    let store = SessionStore::in_memory();
    let observed = Arc::new(Mutex::new(None));
    let sink = observed.clone();
    let reader = store.clone();
    store.subscribe(move |_| *sink.lock().unwrap() = Some(reader.token()));
    store.begin(Some("tok"), &sample_user("u1"));
    assert_eq!(*observed.lock().unwrap(), Some(Some("tok".to_owned())));
}

#[test]
fn clones_share_storage_and_listeners() {
    let store = SessionStore::in_memory();
    let other = store.clone();
    let calls = Arc::new(Mutex::new(0_u32));
    let sink = calls.clone();
    other.subscribe(move |_| *sink.lock().unwrap() += 1);
    store.set_token("tok");
    store.clear();
    assert_eq!(other.token(), None);
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_inert_outside_the_browser() {
    let store = SessionStore::browser();
    store.set_token("tok");
    assert_eq!(store.token(), None);
}
