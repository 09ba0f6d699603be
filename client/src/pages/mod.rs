//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form signals, the request it
//! issues, where it navigates next) and delegates the flow logic to `state`.

pub mod about;
pub mod forgot;
pub mod home;
pub mod landing;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod register;
pub mod reset_password;
