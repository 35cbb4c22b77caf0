//! Link Catalog
//!
//! Static, ordered list of header links. Each link either navigates to a
//! page route or scrolls to an anchor on the landing page.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Icon shown next to a link or call-to-action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Briefcase,
    Building2,
    Bookmark,
    GraduationCap,
    Award,
    CreditCard,
    Sparkles,
    User,
}

/// Where a link points
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    /// A distinct page path, reached by a route transition
    Route(String),
    /// An element id on the landing page, scrolled into view
    Anchor(String),
}

/// A single header link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLinkEntry", into = "RawLinkEntry")]
pub struct LinkEntry {
    pub name: String,
    pub target: LinkTarget,
    pub icon: Option<Icon>,
}

impl LinkEntry {
    /// Link to a page route
    pub fn route(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: LinkTarget::Route(path.into()),
            icon: None,
        }
    }

    /// Link to an in-page anchor
    pub fn anchor(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: LinkTarget::Anchor(id.into()),
            icon: None,
        }
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self.target, LinkTarget::Anchor(_))
    }
}

/// Wire shape of a link in config files: exactly one of `route` / `anchor`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLinkEntry {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<Icon>,
}

impl TryFrom<RawLinkEntry> for LinkEntry {
    type Error = CatalogError;

    fn try_from(raw: RawLinkEntry) -> Result<Self, Self::Error> {
        let target = match (raw.route, raw.anchor) {
            (Some(path), None) => LinkTarget::Route(path),
            (None, Some(id)) => LinkTarget::Anchor(id),
            _ => return Err(CatalogError::AmbiguousTarget(raw.name)),
        };

        Ok(Self {
            name: raw.name,
            target,
            icon: raw.icon,
        })
    }
}

impl From<LinkEntry> for RawLinkEntry {
    fn from(entry: LinkEntry) -> Self {
        let (route, anchor) = match entry.target {
            LinkTarget::Route(path) => (Some(path), None),
            LinkTarget::Anchor(id) => (None, Some(id)),
        };

        Self {
            name: entry.name,
            route,
            anchor,
            icon: entry.icon,
        }
    }
}

/// Ordered, validated set of links. Order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCatalog {
    entries: Vec<LinkEntry>,
}

impl LinkCatalog {
    /// Build a catalog, rejecting duplicate names and malformed targets
    pub fn new(entries: Vec<LinkEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entries.len());

        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateName(entry.name.clone()));
            }

            match &entry.target {
                LinkTarget::Route(path) if !path.starts_with('/') => {
                    return Err(CatalogError::InvalidRoute(path.clone()));
                }
                LinkTarget::Anchor(id) if id.is_empty() || id.contains('#') => {
                    return Err(CatalogError::InvalidAnchor(id.clone()));
                }
                _ => {}
            }
        }

        Ok(Self { entries })
    }

    /// Links shown by the CareerHub header
    pub fn career_hub() -> Self {
        Self {
            entries: vec![
                LinkEntry::route("Browse", "/browse").icon(Icon::Briefcase),
                LinkEntry::route("Companies", "/companies").icon(Icon::Building2),
                LinkEntry::route("Bookmarks", "/bookmarks").icon(Icon::Bookmark),
                LinkEntry::route("Assessments", "/assessments").icon(Icon::GraduationCap),
                LinkEntry::anchor("Success Stories", "testimonials").icon(Icon::Award),
                LinkEntry::anchor("Plans", "pricing").icon(Icon::CreditCard),
            ],
        }
    }

    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&LinkEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LinkCatalog {
    fn default() -> Self {
        Self::career_hub()
    }
}

/// Catalog validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Link name must not be empty")]
    EmptyName,

    #[error("Duplicate link name: {0}")]
    DuplicateName(String),

    #[error("Route must start with '/': {0}")]
    InvalidRoute(String),

    #[error("Invalid anchor id: {0:?}")]
    InvalidAnchor(String),

    #[error("Link {0:?} must set exactly one of `route` or `anchor`")]
    AmbiguousTarget(String),
}
