//! # client
//!
//! Leptos + WASM front end for the Hireboard job marketplace.
//!
//! This crate contains pages, components, session state, the REST API
//! wrappers, and the query cache. Browser-only glue compiles under the
//! `hydrate` feature; server rendering compiles under `ssr`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
