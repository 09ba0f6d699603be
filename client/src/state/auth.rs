//! Auth-session state and the login / registration / password-reset flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call these flows and turn the results into notifications and
//! navigation. Each flow is one request; persisted state changes only after
//! a successful response, so a failed login leaves storage untouched.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::Transport;
use crate::net::types::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, ResetPasswordRequest, SendCodeRequest, User,
    VerifyCodeRequest, VerifyCodeResponse,
};
use crate::state::nav::SEND_CODE_ROUTE;
use crate::state::session::{SessionEvent, SessionStore};

/// Current user as seen by the UI, kept in sync with the session store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    pub fn from_session(session: &SessionStore) -> Self {
        Self { user: session.user() }
    }

    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Started(user) | SessionEvent::UserChanged(user) => self.user = Some(user.clone()),
            SessionEvent::Cleared => self.user = None,
        }
    }
}

/// Prefer the user handed over in navigation state, then the stored record.
pub fn resolve_user(nav_user: Option<User>, session: &SessionStore) -> Option<User> {
    nav_user.or_else(|| session.user())
}

// =============================================================================
// INPUT VALIDATION
// =============================================================================

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

pub fn validate_register(username: &str, email: &str, password: &str) -> Result<RegisterRequest, &'static str> {
    let (username, email) = (username.trim(), email.trim());
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in username, email, and password.");
    }
    Ok(RegisterRequest { username: username.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

pub fn validate_send_code(email: &str) -> Result<SendCodeRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter an email first.");
    }
    Ok(SendCodeRequest { email: email.to_owned() })
}

pub fn validate_verify_code(email: &str, code: &str) -> Result<VerifyCodeRequest, &'static str> {
    let (email, code) = (email.trim(), code.trim());
    if email.is_empty() || code.is_empty() {
        return Err("Enter both email and security code.");
    }
    Ok(VerifyCodeRequest { email: email.to_owned(), security_code: code.to_owned() })
}

// =============================================================================
// FLOWS
// =============================================================================

/// Log in and persist token + user record on success.
pub async fn login<T: Transport>(api: &ApiClient<T>, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    let resp = api.login(request).await?;
    api.session().begin(resp.token.as_deref(), &resp.user);
    Ok(resp)
}

pub async fn register<T: Transport>(
    api: &ApiClient<T>,
    request: &RegisterRequest,
) -> Result<MessageResponse, ApiError> {
    api.register(request).await
}

pub async fn send_code<T: Transport>(
    api: &ApiClient<T>,
    request: &SendCodeRequest,
) -> Result<MessageResponse, ApiError> {
    api.send_code(request).await
}

/// Verify the emailed code and remember the returned user id as the
/// storage fallback for the reset step.
pub async fn verify_code<T: Transport>(
    api: &ApiClient<T>,
    request: &VerifyCodeRequest,
) -> Result<VerifyCodeResponse, ApiError> {
    let resp = api.verify_code(request).await?;
    api.session().set_reset_id(&resp.user.id);
    Ok(resp)
}

/// Where the reset step gets its user identifier from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResetTarget {
    Proceed(String),
    RedirectToSendCode,
}

pub fn resolve_reset_id(nav_id: Option<&str>, session: &SessionStore) -> ResetTarget {
    nav_id
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .or_else(|| session.reset_id())
        .map_or(ResetTarget::RedirectToSendCode, ResetTarget::Proceed)
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResetOutcome {
    /// No identifier available; nothing was sent.
    Redirect(&'static str),
    Done(MessageResponse),
}

/// Submit the new password for the identifier carried over from the
/// verify-code step.
pub async fn reset_password<T: Transport>(
    api: &ApiClient<T>,
    nav_id: Option<&str>,
    password: &str,
    confirm_password: &str,
) -> Result<ResetOutcome, ApiError> {
    let ResetTarget::Proceed(id) = resolve_reset_id(nav_id, api.session()) else {
        return Ok(ResetOutcome::Redirect(SEND_CODE_ROUTE));
    };
    let request = ResetPasswordRequest {
        password: password.to_owned(),
        confirm_password: confirm_password.to_owned(),
        id,
    };
    let resp = api.reset_password(&request).await?;
    api.session().clear_reset_id();
    Ok(ResetOutcome::Done(resp))
}

/// Send `POST /logout` with the credential current at call time, then erase
/// every persisted session key. The local session ends even if the request
/// fails.
pub async fn logout<T: Transport>(api: &ApiClient<T>) {
    let request = api.logout_request();
    api.session().end();
    if let Err(e) = api.dispatch(request).await {
        leptos::logging::warn!("logout request failed: {e}");
    }
}
