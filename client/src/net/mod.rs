//! Networking modules for the task backend's REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` maps endpoints to typed calls, `transport` is the HTTP seam,
//! `error` classifies failures, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod transport;
pub mod types;
