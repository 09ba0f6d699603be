//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome (navigation, notifications, the session gate)
//! and read shared state from Leptos context providers set up in `app`.

pub mod loading;
pub mod navbar;
pub mod protected_route;
pub mod toaster;
