//! State Management
//!
//! Bridges the navigation core into Leptos signals.

pub mod nav;

pub use nav::{NavHandle, SessionRequests};
