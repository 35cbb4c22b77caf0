//! Navigation State Machine
//!
//! Single reducer for the header. Route changes, viewport changes, session
//! updates and user clicks arrive as [`NavEvent`]s; the machine updates its
//! state and returns the [`NavEffect`]s the presentation shell must carry
//! out (route transitions, smooth scrolls).
//!
//! ```text
//!            toggle
//!   Closed ─────────▶ Open
//!     ▲                 │ toggle | close | activate | route change
//!     └─────────────────┘ | viewport reaches desktop width
//! ```

use serde::Serialize;
use std::rc::Rc;

use super::activation::{self, Activation, AnchorLookup, NoAnchors, RouteRequest, HOME_ROUTE};
use super::catalog::{LinkCatalog, LinkEntry};
use super::cta::{self, CtaDescriptor};
use super::scroll_lock::{NoScrollLock, ScrollLock, ScrollLockGuard};
use super::session::SessionStatus;

/// Viewport width (px) from which the full desktop header is shown
pub const DEFAULT_BREAKPOINT_PX: u32 = 768;

/// Header layout for the current viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Links live in the slide-over menu
    #[default]
    Mobile,
    /// Links are inline; no menu
    Desktop,
}

impl Layout {
    pub fn from_width(width: u32, breakpoint_px: u32) -> Self {
        if width >= breakpoint_px {
            Layout::Desktop
        } else {
            Layout::Mobile
        }
    }
}

/// Mobile menu state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Per-mount navigation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub menu: MenuState,
    pub current_route: String,
}

impl NavState {
    fn mounted_at(route: impl Into<String>) -> Self {
        Self {
            menu: MenuState::Closed,
            current_route: route.into(),
        }
    }
}

/// Inbound events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Navigation to `path` completed
    RouteChanged(String),
    ToggleMenu,
    CloseMenu,
    ActivateLink(LinkEntry),
    ActivateCta(CtaDescriptor),
    SessionChanged(SessionStatus),
    ViewportResized { width: u32 },
}

/// How a scroll effect should animate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Side effects for the presentation shell. Fire-and-forget: the machine
/// never waits for them to complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavEffect {
    Navigate(RouteRequest),
    ScrollIntoView {
        anchor_id: String,
        behavior: ScrollBehavior,
    },
}

/// Collaborators supplied by the host page
#[derive(Clone)]
pub struct NavEnvironment {
    pub anchors: Rc<dyn AnchorLookup>,
    pub scroll_lock: Rc<dyn ScrollLock>,
}

impl NavEnvironment {
    pub fn new(anchors: Rc<dyn AnchorLookup>, scroll_lock: Rc<dyn ScrollLock>) -> Self {
        Self {
            anchors,
            scroll_lock,
        }
    }
}

impl Default for NavEnvironment {
    fn default() -> Self {
        Self::new(Rc::new(NoAnchors), Rc::new(NoScrollLock))
    }
}

/// Everything the presentation layer needs to draw the header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavView {
    pub is_open: bool,
    pub layout: Layout,
    pub current_route: String,
    pub session: SessionStatus,
    pub links: Vec<LinkEntry>,
    pub ctas: &'static [CtaDescriptor],
    /// Icons are only drawn inside the mobile menu
    pub show_icons: bool,
}

/// Header state machine, one per mounted header
pub struct NavigationMachine {
    catalog: Rc<LinkCatalog>,
    state: NavState,
    session: SessionStatus,
    layout: Layout,
    breakpoint_px: u32,
    env: NavEnvironment,
    /// Held exactly while the menu is open
    scroll_guard: Option<ScrollLockGuard>,
}

impl NavigationMachine {
    /// Mount a header at `route`. The menu always starts closed.
    pub fn mount(catalog: Rc<LinkCatalog>, route: impl Into<String>, env: NavEnvironment) -> Self {
        let state = NavState::mounted_at(route);
        tracing::debug!(route = %state.current_route, links = catalog.len(), "Navigation mounted");

        Self {
            catalog,
            state,
            session: SessionStatus::default(),
            layout: Layout::default(),
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            env,
            scroll_guard: None,
        }
    }

    /// Override the desktop breakpoint
    pub fn with_breakpoint(mut self, breakpoint_px: u32) -> Self {
        self.breakpoint_px = breakpoint_px;
        self
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.menu == MenuState::Open
    }

    pub fn current_route(&self) -> &str {
        &self.state.current_route
    }

    pub fn session(&self) -> SessionStatus {
        self.session
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn catalog(&self) -> &LinkCatalog {
        &self.catalog
    }

    /// Apply one event and return the effects to run
    pub fn dispatch(&mut self, event: NavEvent) -> Vec<NavEffect> {
        match event {
            NavEvent::RouteChanged(path) => {
                tracing::debug!(from = %self.state.current_route, to = %path, "Route changed");
                self.state.current_route = path;
                self.close();
                Vec::new()
            }
            NavEvent::ToggleMenu => {
                self.toggle();
                Vec::new()
            }
            NavEvent::CloseMenu => {
                self.close();
                Vec::new()
            }
            NavEvent::ActivateLink(entry) => self.activate(&entry),
            NavEvent::ActivateCta(cta) => {
                self.close();
                vec![NavEffect::Navigate(RouteRequest::to(cta.route))]
            }
            NavEvent::SessionChanged(status) => {
                if status != self.session {
                    tracing::debug!(from = %self.session, to = %status, "Session status changed");
                    self.session = status;
                }
                Vec::new()
            }
            NavEvent::ViewportResized { width } => {
                let layout = Layout::from_width(width, self.breakpoint_px);
                if layout != self.layout {
                    tracing::debug!(width, ?layout, "Layout changed");
                    self.layout = layout;
                }
                if layout == Layout::Desktop {
                    self.close();
                }
                Vec::new()
            }
        }
    }

    pub fn toggle(&mut self) {
        let next = match self.state.menu {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        };
        self.set_menu(next);
    }

    /// Close the menu. Closing a closed menu changes nothing.
    pub fn close(&mut self) {
        self.set_menu(MenuState::Closed);
    }

    /// Activate a header link. The menu is closed whatever the outcome.
    pub fn activate(&mut self, entry: &LinkEntry) -> Vec<NavEffect> {
        let activation = activation::resolve(entry, &self.state.current_route, &*self.env.anchors);
        self.close();

        match activation {
            Activation::Navigate(request) => {
                tracing::debug!(link = %entry.name, href = %request.href(), "Link navigates");
                vec![NavEffect::Navigate(request)]
            }
            Activation::Scroll { anchor_id } => {
                tracing::debug!(link = %entry.name, anchor = %anchor_id, "Link scrolls");
                vec![NavEffect::ScrollIntoView {
                    anchor_id,
                    behavior: ScrollBehavior::Smooth,
                }]
            }
            Activation::Miss { anchor_id } => {
                tracing::debug!(
                    link = %entry.name,
                    anchor = %anchor_id,
                    "Anchor not rendered, ignoring"
                );
                Vec::new()
            }
        }
    }

    /// Snapshot for rendering
    pub fn view(&self) -> NavView {
        NavView {
            is_open: self.is_open(),
            layout: self.layout,
            current_route: self.state.current_route.clone(),
            session: self.session,
            links: self.catalog.entries().to_vec(),
            ctas: cta::compose(self.session),
            show_icons: self.layout == Layout::Mobile,
        }
    }

    fn set_menu(&mut self, next: MenuState) {
        if self.state.menu == next {
            return;
        }

        self.scroll_guard = match next {
            MenuState::Open => Some(ScrollLockGuard::acquire(Rc::clone(&self.env.scroll_lock))),
            MenuState::Closed => None,
        };
        self.state.menu = next;
        tracing::debug!(menu = ?next, "Menu state changed");
    }
}

impl Default for NavigationMachine {
    fn default() -> Self {
        Self::mount(
            Rc::new(LinkCatalog::default()),
            HOME_ROUTE,
            NavEnvironment::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::scroll_lock::testing::CountingLock;
    use super::*;
    use std::collections::HashSet;

    struct Sections(HashSet<String>);

    impl AnchorLookup for Sections {
        fn contains(&self, anchor_id: &str) -> bool {
            self.0.contains(anchor_id)
        }
    }

    fn machine_at(route: &str) -> (NavigationMachine, Rc<CountingLock>) {
        let lock = Rc::new(CountingLock::default());
        let sections = Sections(
            ["testimonials", "pricing"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        let env = NavEnvironment::new(Rc::new(sections), lock.clone());
        let machine = NavigationMachine::mount(Rc::new(LinkCatalog::default()), route, env);
        (machine, lock)
    }

    fn link(machine: &NavigationMachine, name: &str) -> LinkEntry {
        machine.catalog().get(name).cloned().unwrap()
    }

    #[test]
    fn test_mounts_closed() {
        let (machine, lock) = machine_at("/browse");
        assert!(!machine.is_open());
        assert_eq!(machine.current_route(), "/browse");
        assert_eq!(machine.session(), SessionStatus::Loading);
        assert_eq!(lock.locks.get(), 0);
    }

    #[test]
    fn test_toggle_open_close() {
        let (mut machine, lock) = machine_at("/");

        machine.dispatch(NavEvent::ToggleMenu);
        assert!(machine.is_open());
        assert!(lock.is_locked());

        machine.dispatch(NavEvent::ToggleMenu);
        assert!(!machine.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut machine, lock) = machine_at("/");

        let before = machine.state().clone();
        machine.close();
        machine.close();
        assert_eq!(machine.state(), &before);
        assert_eq!(lock.unlocks.get(), 0);

        machine.toggle();
        machine.close();
        machine.close();
        assert!(!machine.is_open());
        assert_eq!(lock.locks.get(), 1);
        assert_eq!(lock.unlocks.get(), 1);
    }

    #[test]
    fn test_route_change_always_closes() {
        let (mut machine, lock) = machine_at("/");
        let routes = ["/browse", "/browse", "/", "/companies", "/bookmarks"];

        for (i, route) in routes.iter().enumerate() {
            if i % 2 == 0 {
                machine.dispatch(NavEvent::ToggleMenu);
            }
            let effects = machine.dispatch(NavEvent::RouteChanged(route.to_string()));

            assert!(effects.is_empty());
            assert!(!machine.is_open());
            assert_eq!(machine.current_route(), *route);
            assert!(!lock.is_locked());
        }
    }

    #[test]
    fn test_route_link_navigates_and_closes() {
        let (mut machine, _lock) = machine_at("/");
        machine.toggle();

        let browse = link(&machine, "Browse");
        let effects = machine.dispatch(NavEvent::ActivateLink(browse));

        assert_eq!(effects, vec![NavEffect::Navigate(RouteRequest::to("/browse"))]);
        assert!(!machine.is_open());
    }

    #[test]
    fn test_anchor_on_home_scrolls_without_navigation() {
        let (mut machine, lock) = machine_at("/");
        machine.toggle();

        let plans = link(&machine, "Plans");
        let effects = machine.activate(&plans);

        assert_eq!(
            effects,
            vec![NavEffect::ScrollIntoView {
                anchor_id: "pricing".to_string(),
                behavior: ScrollBehavior::Smooth,
            }]
        );
        assert!(!effects.iter().any(|e| matches!(e, NavEffect::Navigate(_))));
        assert!(!machine.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_anchor_elsewhere_routes_home_with_fragment() {
        let (mut machine, _lock) = machine_at("/companies");
        machine.toggle();

        let stories = link(&machine, "Success Stories");
        let effects = machine.activate(&stories);

        assert_eq!(
            effects,
            vec![NavEffect::Navigate(RouteRequest::with_fragment("/", "testimonials"))]
        );
        assert!(!machine.is_open());
    }

    #[test]
    fn test_missing_anchor_still_closes() {
        let (mut machine, _lock) = machine_at("/");
        machine.toggle();

        let effects = machine.activate(&LinkEntry::anchor("FAQ", "faq"));

        assert!(effects.is_empty());
        assert!(!machine.is_open());
    }

    #[test]
    fn test_viewport_to_desktop_closes_menu() {
        let (mut machine, lock) = machine_at("/");
        machine.dispatch(NavEvent::ViewportResized { width: 390 });
        machine.toggle();
        assert_eq!(machine.layout(), Layout::Mobile);
        assert!(machine.view().show_icons);

        machine.dispatch(NavEvent::ViewportResized { width: 1280 });
        assert_eq!(machine.layout(), Layout::Desktop);
        assert!(!machine.is_open());
        assert!(!lock.is_locked());
        assert!(!machine.view().show_icons);

        // Shrinking back does not reopen
        machine.dispatch(NavEvent::ViewportResized { width: 600 });
        assert!(!machine.is_open());
    }

    #[test]
    fn test_custom_breakpoint() {
        let (machine, _lock) = machine_at("/");
        let mut machine = machine.with_breakpoint(1024);

        machine.dispatch(NavEvent::ViewportResized { width: 900 });
        assert_eq!(machine.layout(), Layout::Mobile);
        machine.dispatch(NavEvent::ViewportResized { width: 1024 });
        assert_eq!(machine.layout(), Layout::Desktop);
    }

    #[test]
    fn test_unmount_releases_scroll_lock() {
        let (mut machine, lock) = machine_at("/");
        machine.toggle();
        assert!(lock.is_locked());

        drop(machine);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_view_tracks_session() {
        let (mut machine, _lock) = machine_at("/");
        assert!(machine.view().ctas.is_empty());

        machine.dispatch(NavEvent::SessionChanged(SessionStatus::Authenticated));
        let view = machine.view();
        assert_eq!(view.ctas.len(), 1);
        assert_eq!(view.ctas[0].label, "Dashboard");
        assert_eq!(view.links.len(), 6);
    }

    #[test]
    fn test_sign_up_scenario() {
        let (mut machine, lock) = machine_at("/");

        machine.dispatch(NavEvent::SessionChanged(SessionStatus::Loading));
        machine.dispatch(NavEvent::SessionChanged(SessionStatus::Unauthenticated));
        machine.dispatch(NavEvent::ToggleMenu);
        assert!(machine.is_open());

        let sign_up = *machine
            .view()
            .ctas
            .iter()
            .find(|c| c.label == "Sign Up")
            .unwrap();
        let effects = machine.dispatch(NavEvent::ActivateCta(sign_up));

        assert_eq!(effects, vec![NavEffect::Navigate(RouteRequest::to("/signup"))]);
        assert!(!machine.is_open());
        assert!(!lock.is_locked());

        machine.dispatch(NavEvent::RouteChanged("/signup".to_string()));
        assert_eq!(machine.current_route(), "/signup");
        assert!(!machine.is_open());
    }

    #[test]
    fn test_effect_serialization() {
        let effect = NavEffect::ScrollIntoView {
            anchor_id: "pricing".to_string(),
            behavior: ScrollBehavior::Smooth,
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "scroll_into_view",
                "anchor_id": "pricing",
                "behavior": "smooth"
            })
        );
    }
}
