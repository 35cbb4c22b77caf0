//! # CareerHub
//!
//! Navigation shell of the CareerHub job platform: the adaptive site header
//! and the shared session-store connection used across the application.
//!
//! ## Features
//!
//! - **Adaptive header**: one reducer reconciles route, viewport, session and
//!   click events into a consistent menu/link/CTA view
//! - **Dual-mode links**: page routes or smooth-scrolled landing-page anchors
//! - **Session-aware CTAs**: nothing while loading, never the wrong set
//! - **Shared store**: connect-once client with retry on demand
//!
//! ## Modules
//!
//! - [`nav`]: header state machine, link catalog, activation, CTAs
//! - [`store`]: process-wide session store connection (feature `server`)
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use careerhub::nav::*;
//!
//! let mut header = NavigationMachine::default();
//! header.dispatch(NavEvent::SessionChanged(SessionStatus::Unauthenticated));
//! header.dispatch(NavEvent::ToggleMenu);
//!
//! let plans = header.catalog().get("Plans").cloned().unwrap();
//! let effects = header.dispatch(NavEvent::ActivateLink(plans));
//!
//! assert!(!header.is_open());
//! assert_eq!(effects.len(), 0); // no #pricing section in a headless run
//! assert_eq!(header.view().ctas.len(), 3);
//! ```

pub mod config;
#[cfg(feature = "server")]
pub mod logging;
pub mod nav;
#[cfg(feature = "server")]
pub mod store;

pub use config::{Config, ConfigError, LoggingConfig, NavigationConfig, StoreConfig};

pub use nav::{
    compose, Activation, AnchorLookup, CatalogError, CtaDescriptor, Icon, Layout, LinkCatalog,
    LinkEntry, LinkTarget, MenuState, NavEffect, NavEnvironment, NavEvent, NavState, NavView,
    NavigationMachine, RouteRequest, ScrollLock, SessionStatus, VisualWeight,
};

#[cfg(feature = "server")]
pub use store::{
    ConnectionState, Connector, MemoryConnector, RedisConnector, StoreConnection, StoreError,
    StoreHandle, StoreResult, StoreTransport,
};
