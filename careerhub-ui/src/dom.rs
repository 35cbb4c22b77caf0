//! DOM Adapters
//!
//! Browser implementations of the navigation core's collaborators.

use careerhub::nav::{AnchorLookup, NavEffect, ScrollBehavior, ScrollLock};
use leptos::{document, window};

/// Locks page scroll by hiding overflow on `<body>`
#[derive(Debug, Default, Clone, Copy)]
pub struct DomScrollLock;

impl ScrollLock for DomScrollLock {
    fn lock(&self) {
        if let Some(body) = document().body() {
            let _ = body.style().set_property("overflow", "hidden");
        }
    }

    fn unlock(&self) {
        if let Some(body) = document().body() {
            let _ = body.style().remove_property("overflow");
        }
    }
}

/// Finds anchor sections with `getElementById`
#[derive(Debug, Default, Clone, Copy)]
pub struct DomAnchors;

impl AnchorLookup for DomAnchors {
    fn contains(&self, anchor_id: &str) -> bool {
        document().get_element_by_id(anchor_id).is_some()
    }
}

/// Current viewport width in CSS pixels
pub fn viewport_width() -> u32 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map(|w| w.max(0.0) as u32)
        .unwrap_or(0)
}

/// Carry out one effect. `navigate` performs client-side route transitions.
pub fn run_effect(effect: &NavEffect, navigate: &dyn Fn(&str)) {
    match effect {
        // The landing page reveals the fragment on its own mount, so this
        // needs a document navigation rather than a client-side one
        NavEffect::Navigate(request) if request.fragment.is_some() => {
            if let Err(e) = window().location().set_href(&request.href()) {
                web_sys::console::error_1(&e);
            }
        }
        NavEffect::Navigate(request) => navigate(&request.path),
        NavEffect::ScrollIntoView {
            anchor_id,
            behavior,
        } => {
            // Section may have unmounted since activation; missing is fine
            let Some(element) = document().get_element_by_id(anchor_id) else {
                return;
            };

            let options = web_sys::ScrollIntoViewOptions::new();
            options.set_behavior(match behavior {
                ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
                ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            });
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}
