//! Per-mount liveness flag for async work.
//!
//! DESIGN
//! ======
//! In-flight requests are never aborted. A page or guard creates one
//! `Liveness` on mount and ends it from `on_cleanup`; async tasks check it
//! before writing their results into component signals. Clones share the
//! same flag.

#[cfg(test)]
#[path = "liveness_test.rs"]
mod liveness_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the owning mount as gone. Idempotent.
    pub fn end(&self) {
        self.alive.store(false, Ordering::Release);
    }

    /// Run `apply` only while the mount is still alive. Returns whether it ran.
    pub fn deliver<F: FnOnce()>(&self, apply: F) -> bool {
        if self.is_alive() {
            apply();
            true
        } else {
            leptos::logging::log!("dropping response for unmounted view");
            false
        }
    }
}
