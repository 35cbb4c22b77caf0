//! CareerHub Header
//!
//! Client-side rendered (CSR) Leptos shell around the `careerhub` navigation
//! core. Compiles to WebAssembly.
//!
//! # Architecture
//!
//! The core owns all header state. This crate only
//! - feeds it route, viewport, keyboard and session events,
//! - carries out the effects it returns (navigation, smooth scroll),
//! - renders its `NavView`.

use leptos::*;

mod api;
mod app;
mod components;
mod dom;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
