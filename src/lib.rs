//! # promptpack
//!
//! Leptos front end for the prompt-pack authoring and assessment tool.
//!
//! This crate contains the session store and its identity provider seam, the
//! route guard that gates signed-in and guest-only pages, and the pages
//! themselves. With the `ssr` feature the same crate builds the Axum server
//! that renders and serves the app.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
#[cfg(feature = "ssr")]
pub mod server;
pub mod state;
pub mod util;

/// WASM entry point: attach the client app to the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // A second logger install only happens on hot reload; keep the first.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
