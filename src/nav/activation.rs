//! Activation Resolver
//!
//! Decides what clicking a header link does: a route transition, a smooth
//! scroll on the landing page, or a transition to the landing page that
//! carries the anchor as a fragment.

use serde::Serialize;

use super::catalog::{LinkEntry, LinkTarget};

/// Path of the landing page that hosts the anchor sections
pub const HOME_ROUTE: &str = "/";

/// Scoped DOM query: can the page currently scroll to this element id?
pub trait AnchorLookup {
    fn contains(&self, anchor_id: &str) -> bool;
}

/// Lookup that never finds anything (server side, headless tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnchors;

impl AnchorLookup for NoAnchors {
    fn contains(&self, _anchor_id: &str) -> bool {
        false
    }
}

/// A route transition request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRequest {
    pub path: String,
    /// Anchor to reveal once the destination has mounted
    pub fragment: Option<String>,
}

impl RouteRequest {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fragment: None,
        }
    }

    pub fn with_fragment(path: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fragment: Some(fragment.into()),
        }
    }

    /// Location string, e.g. `/#pricing`
    pub fn href(&self) -> String {
        match &self.fragment {
            Some(fragment) => format!("{}#{}", self.path, fragment),
            None => self.path.clone(),
        }
    }
}

/// Outcome of activating a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Navigate(RouteRequest),
    Scroll { anchor_id: String },
    /// Anchor link on the landing page whose section is not rendered (yet)
    Miss { anchor_id: String },
}

/// True when `path` is the landing page, ignoring query and fragment
pub fn is_home(path: &str) -> bool {
    let bare = path.split(['?', '#']).next().unwrap_or_default();
    bare.is_empty() || bare == HOME_ROUTE
}

/// Resolve a link activation against the current route
pub fn resolve(entry: &LinkEntry, current_route: &str, anchors: &dyn AnchorLookup) -> Activation {
    match &entry.target {
        LinkTarget::Route(path) => Activation::Navigate(RouteRequest::to(path.clone())),
        LinkTarget::Anchor(id) if is_home(current_route) => {
            if anchors.contains(id) {
                Activation::Scroll {
                    anchor_id: id.clone(),
                }
            } else {
                Activation::Miss {
                    anchor_id: id.clone(),
                }
            }
        }
        LinkTarget::Anchor(id) => {
            Activation::Navigate(RouteRequest::with_fragment(HOME_ROUTE, id.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Sections(HashSet<&'static str>);

    impl AnchorLookup for Sections {
        fn contains(&self, anchor_id: &str) -> bool {
            self.0.contains(anchor_id)
        }
    }

    fn landing_page() -> Sections {
        Sections(["testimonials", "pricing"].into_iter().collect())
    }

    #[test]
    fn test_route_link_navigates_everywhere() {
        let browse = LinkEntry::route("Browse", "/browse");

        for route in ["/", "/companies", "/browse"] {
            assert_eq!(
                resolve(&browse, route, &landing_page()),
                Activation::Navigate(RouteRequest::to("/browse"))
            );
        }
    }

    #[test]
    fn test_anchor_on_home_scrolls() {
        let plans = LinkEntry::anchor("Plans", "pricing");
        assert_eq!(
            resolve(&plans, "/", &landing_page()),
            Activation::Scroll {
                anchor_id: "pricing".to_string()
            }
        );
    }

    #[test]
    fn test_anchor_on_home_missing_section() {
        let faq = LinkEntry::anchor("FAQ", "faq");
        assert_eq!(
            resolve(&faq, "/", &landing_page()),
            Activation::Miss {
                anchor_id: "faq".to_string()
            }
        );
    }

    #[test]
    fn test_anchor_elsewhere_carries_fragment() {
        let stories = LinkEntry::anchor("Success Stories", "testimonials");
        let activation = resolve(&stories, "/companies", &landing_page());

        match activation {
            Activation::Navigate(request) => {
                assert_eq!(request.path, "/");
                assert_eq!(request.href(), "/#testimonials");
            }
            other => panic!("expected navigation, got {:?}", other),
        }
    }

    #[test]
    fn test_is_home() {
        assert!(is_home("/"));
        assert!(is_home(""));
        assert!(is_home("/?ref=mail"));
        assert!(is_home("/#pricing"));
        assert!(!is_home("/browse"));
        assert!(!is_home("/browse?q=/"));
    }
}
