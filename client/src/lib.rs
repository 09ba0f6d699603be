//! # client
//!
//! Leptos + WASM frontend for the tasknest todo application.
//!
//! This crate contains pages, components, application state, and the REST
//! client that talks to the remote task backend. The backend itself is not
//! part of this repository; every request goes to the base URL configured at
//! build time (see [`config`]).
//!
//! ARCHITECTURE
//! ============
//! `net` owns the wire schema, transport, and error taxonomy. `state` owns the
//! session store, the session guard state machine, and per-page models.
//! `components` and `pages` are thin Leptos views over those models.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

/// WASM entry point: install panic/console hooks and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
