//! # client
//!
//! Leptos + WASM frontend for the users dashboard.
//!
//! The dashboard page renders a heading and mounts an invisible user logger.
//! The logger fetches `/api/go/users` once per mount and reports the outcome
//! to an injectable log sink.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod util;

/// Browser entry point: install console logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
