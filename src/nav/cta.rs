//! Call-to-Action Composer
//!
//! Maps the session status to the account controls shown on the right of
//! the header. Results are `'static` tables, so the same status always
//! yields the very same slice.

use serde::Serialize;

use super::catalog::Icon;
use super::session::SessionStatus;

/// Visual emphasis of a call-to-action button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualWeight {
    Primary,
    Secondary,
}

/// A single account control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CtaDescriptor {
    pub label: &'static str,
    pub route: &'static str,
    pub weight: VisualWeight,
    pub icon: Icon,
}

static SIGNED_IN: [CtaDescriptor; 1] = [CtaDescriptor {
    label: "Dashboard",
    route: "/dashboard",
    weight: VisualWeight::Primary,
    icon: Icon::Sparkles,
}];

static SIGNED_OUT: [CtaDescriptor; 3] = [
    CtaDescriptor {
        label: "Company Login",
        route: "/company/login",
        weight: VisualWeight::Secondary,
        icon: Icon::Building2,
    },
    CtaDescriptor {
        label: "Student Login",
        route: "/login",
        weight: VisualWeight::Secondary,
        icon: Icon::User,
    },
    CtaDescriptor {
        label: "Sign Up",
        route: "/signup",
        weight: VisualWeight::Primary,
        icon: Icon::Sparkles,
    },
];

/// Controls to render for a session status.
///
/// Nothing is rendered while the session is still loading, so the header
/// never flashes the wrong set.
pub fn compose(status: SessionStatus) -> &'static [CtaDescriptor] {
    match status {
        SessionStatus::Loading => &[],
        SessionStatus::Authenticated => &SIGNED_IN,
        SessionStatus::Unauthenticated => &SIGNED_OUT,
    }
}
