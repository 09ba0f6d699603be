//! Route paths and transient navigation payloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hand data to the next screen (the logged-in user, the password
//! reset identifier) through `NavigationState` in context. It lives only in
//! memory; anything that must survive a reload also goes to the session store.

pub const LANDING_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";
pub const SEND_CODE_ROUTE: &str = "/send-code";
pub const RESET_PASSWORD_ROUTE: &str = "/reset-password";
pub const HOME_ROUTE: &str = "/todo/home";
pub const ABOUT_ROUTE: &str = "/todo/about";
pub const PROFILE_ROUTE: &str = "/todo/profile";

use crate::net::types::User;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationState {
    pub user: Option<User>,
    pub reset_id: Option<String>,
}

impl NavigationState {
    pub fn with_user(user: User) -> Self {
        Self { user: Some(user), reset_id: None }
    }

    pub fn with_reset_id(id: String) -> Self {
        Self { user: None, reset_id: Some(id) }
    }
}
