//! # client
//!
//! Leptos + WASM shell for the AskGrid question-answering console.
//!
//! This crate contains the route table and guard, the session store, the
//! `ApiClient` seam with its HTTP and mock backends, and the login, chat,
//! and user-management pages. The host server renders it with SSR and the
//! browser hydrates it through [`hydrate`].

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
