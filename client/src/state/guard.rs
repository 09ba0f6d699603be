//! Session guard: the gate in front of every protected route.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ProtectedRoute` builds one `SessionGuard` per mount, activates it once,
//! and renders from `GuardView`. Nothing is cached across mounts.
//!
//! DESIGN
//! ======
//! ```text
//!            Valid
//! Checking ─────────► Authenticated
//!     │
//!     │ Invalid | Failed(_)          (token + user record erased)
//!     └─────────────► Unauthenticated
//! ```
//! `Checking` is left exactly once. Settled states absorb any further input,
//! so a stray second verification result cannot flip the outcome. Every
//! failure class is treated as an invalid session (fail closed).

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::Transport;
use crate::state::session::SessionStore;

/// Public entry point unauthenticated visitors are sent to.
pub const PUBLIC_ENTRY: &str = "/";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Checking,
    Authenticated,
    Unauthenticated,
}

/// Outcome of the single verification round trip.
#[derive(Clone, Debug, PartialEq)]
pub enum Verification {
    Valid,
    Invalid,
    Failed(ApiError),
}

impl Verification {
    /// Collapse a `/verify-user` result into a verification outcome.
    pub fn from_result(result: Result<bool, ApiError>) -> Self {
        match result {
            Ok(true) => Self::Valid,
            Ok(false) => Self::Invalid,
            Err(e) => Self::Failed(e),
        }
    }
}

/// What a protected route should show for a guard state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardView {
    /// Neither content nor redirect yet.
    Interim,
    Redirect(&'static str),
    Protected,
}

impl GuardState {
    /// The single transition function.
    pub fn transition(self, verification: &Verification) -> Self {
        match (self, verification) {
            (Self::Checking, Verification::Valid) => Self::Authenticated,
            (Self::Checking, Verification::Invalid | Verification::Failed(_)) => Self::Unauthenticated,
            (settled, _) => settled,
        }
    }

    pub fn is_settled(self) -> bool {
        self != Self::Checking
    }

    pub fn view(self) -> GuardView {
        match self {
            Self::Checking => GuardView::Interim,
            Self::Authenticated => GuardView::Protected,
            Self::Unauthenticated => GuardView::Redirect(PUBLIC_ENTRY),
        }
    }
}

/// One activation of the session gate.
#[derive(Clone, Debug)]
pub struct SessionGuard {
    state: GuardState,
    had_token: bool,
}

impl SessionGuard {
    /// Start in `Checking`, noting whether a token was present. The flag is
    /// bookkeeping only; it does not grant access.
    pub fn new(session: &SessionStore) -> Self {
        Self { state: GuardState::Checking, had_token: session.token().is_some() }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn had_token(&self) -> bool {
        self.had_token
    }

    pub fn view(&self) -> GuardView {
        self.state.view()
    }

    /// Apply a verification outcome. Erases stored credentials when the
    /// guard lands in `Unauthenticated`.
    pub fn settle(&mut self, verification: &Verification, session: &SessionStore) -> GuardState {
        if self.state.is_settled() {
            return self.state;
        }
        self.state = self.state.transition(verification);
        match verification {
            Verification::Valid => leptos::logging::log!("session verified"),
            Verification::Invalid => leptos::logging::log!("session rejected by backend"),
            Verification::Failed(e) => leptos::logging::warn!("session verification failed: {e}"),
        }
        if self.state == GuardState::Unauthenticated {
            session.clear();
        }
        self.state
    }

    /// Issue the one verification request for this activation and settle.
    /// A guard that has already settled returns its state without a request.
    pub async fn activate<T: Transport>(&mut self, api: &ApiClient<T>) -> GuardState {
        if self.state.is_settled() {
            return self.state;
        }
        let result = api.verify_user().await.map(|resp| resp.success);
        self.settle(&Verification::from_result(result), api.session())
    }
}
