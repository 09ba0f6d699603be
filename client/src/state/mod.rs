//! Application state and page models.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` is the single owner of persisted credentials. `guard` decides
//! access to protected routes. The remaining modules are plain models that
//! pages drive and Leptos signals wrap.

pub mod auth;
pub mod guard;
pub mod nav;
pub mod profile;
pub mod session;
pub mod todos;
pub mod toasts;
