//! App Root Component
//!
//! Router plus the persistent header. Page bodies are rendered by their own
//! applications and mount into `#content`.

use leptos::*;
use leptos_router::*;

use crate::components::Header;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="min-h-screen flex flex-col">
                <Header />
                <main id="content" class="flex-1" />
            </div>
        </Router>
    }
}
