//! Header Navigation
//!
//! Framework-independent core of the site header.
//!
//! ## Architecture
//!
//! - **Catalog**: ordered header links (route or anchor targets)
//! - **Machine**: reducer owning the menu state, fed by route, viewport,
//!   session and click events
//! - **Activation**: decides between route transition and smooth scroll
//! - **CTA**: account controls derived from the session status
//! - **ScrollLock**: scoped background-scroll suppression while the menu is open
//!
//! ## Data Flow
//!
//! 1. The host pushes `RouteChanged` / `SessionChanged` / `ViewportResized`
//! 2. User clicks become `ToggleMenu` / `ActivateLink` / `ActivateCta`
//! 3. `dispatch` returns effects; the host performs them
//! 4. The host re-renders from `view()`

mod activation;
mod catalog;
mod cta;
mod machine;
mod scroll_lock;
mod session;

pub use activation::{
    is_home, resolve, Activation, AnchorLookup, NoAnchors, RouteRequest, HOME_ROUTE,
};
pub use catalog::{CatalogError, Icon, LinkCatalog, LinkEntry, LinkTarget};
pub use cta::{compose, CtaDescriptor, VisualWeight};
pub use machine::{
    Layout, MenuState, NavEffect, NavEnvironment, NavEvent, NavState, NavView, NavigationMachine,
    ScrollBehavior, DEFAULT_BREAKPOINT_PX,
};
pub use scroll_lock::{NoScrollLock, ScrollLock, ScrollLockGuard};
pub use session::{SessionStatus, UnknownSessionStatus};
