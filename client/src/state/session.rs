//! Process-wide session store backed by browser `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login, logout, the session guard, and profile edits all read or write the
//! persisted credential through this one store instead of touching storage
//! directly. Components that must react to login/logout subscribe to it.
//!
//! DESIGN
//! ======
//! Storage is a small key/value trait so the store runs unchanged against
//! `localStorage` in the browser and an in-memory map in tests and SSR.
//! Writes are last-writer-wins; listeners run after the write, outside the
//! listener lock, so a listener may read the store again.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::net::types::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const RESET_ID_KEY: &str = "_id";

// =============================================================================
// STORAGE BACKENDS
// =============================================================================

/// Minimal string key/value storage.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Reads return `None` and writes are dropped outside
/// the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Map-backed storage for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Change notifications delivered to subscribers.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// A token and user record were stored after login.
    Started(User),
    /// The stored user record was replaced.
    UserChanged(User),
    /// Credentials were erased (logout or failed verification).
    Cleared,
}

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(u64);

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    listeners: Arc<Mutex<Vec<(u64, Listener)>>>,
    next_listener: Arc<AtomicU64>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_token", &self.token().is_some())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn browser() -> Self {
        Self::new(Arc::new(BrowserStorage))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// Current bearer token, treating an empty string as absent.
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) {
        self.storage.set(TOKEN_KEY, token);
    }

    /// Stored user record, or `None` when absent or unreadable.
    pub fn user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                leptos::logging::warn!("stored user record unreadable: {e}");
                None
            }
        }
    }

    pub fn set_user(&self, user: &User) {
        self.write_user(user);
        self.emit(&SessionEvent::UserChanged(user.clone()));
    }

    /// Persist a fresh login. A missing token leaves any previous token alone.
    pub fn begin(&self, token: Option<&str>, user: &User) {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.set_token(token);
        }
        self.write_user(user);
        self.emit(&SessionEvent::Started(user.clone()));
    }

    /// Password-reset identifier, stored JSON-encoded.
    pub fn reset_id(&self) -> Option<String> {
        let raw = self.storage.get(RESET_ID_KEY)?;
        serde_json::from_str::<String>(&raw).ok().filter(|id| !id.is_empty())
    }

    pub fn set_reset_id(&self, id: &str) {
        if let Ok(raw) = serde_json::to_string(id) {
            self.storage.set(RESET_ID_KEY, &raw);
        }
    }

    pub fn clear_reset_id(&self) {
        self.storage.remove(RESET_ID_KEY);
    }

    /// Erase token and user record.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.emit(&SessionEvent::Cleared);
    }

    /// Erase everything a session leaves behind, including the reset id.
    pub fn end(&self) {
        self.storage.remove(RESET_ID_KEY);
        self.clear();
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(id, _)| *id != subscription.0);
    }

    fn write_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => self.storage.set(USER_KEY, &raw),
            Err(e) => leptos::logging::warn!("user record not persisted: {e}"),
        }
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}
