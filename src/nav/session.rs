//! Session Status
//!
//! Authentication status as pushed by the session signal. The navigation
//! core only reads it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Authentication status of the current visitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Auth provider has not answered yet
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Loading => "loading",
            SessionStatus::Authenticated => "authenticated",
            SessionStatus::Unauthenticated => "unauthenticated",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionStatus::Loading)
    }

    /// Interpret the body of the auth provider's session endpoint.
    ///
    /// The endpoint answers `{}` (or `null`) for anonymous visitors and an
    /// object carrying a `user` for signed-in ones.
    pub fn from_session_payload(payload: &serde_json::Value) -> Self {
        match payload.get("user") {
            Some(user) if !user.is_null() => SessionStatus::Authenticated,
            _ => SessionStatus::Unauthenticated,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a status string the auth provider never emits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown session status: {0}")]
pub struct UnknownSessionStatus(pub String);

impl FromStr for SessionStatus {
    type Err = UnknownSessionStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loading" => Ok(SessionStatus::Loading),
            "authenticated" => Ok(SessionStatus::Authenticated),
            "unauthenticated" => Ok(SessionStatus::Unauthenticated),
            other => Err(UnknownSessionStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_status() {
        assert_eq!("loading".parse::<SessionStatus>().unwrap(), SessionStatus::Loading);
        assert_eq!(
            "unauthenticated".parse::<SessionStatus>().unwrap(),
            SessionStatus::Unauthenticated
        );

        let err = "expired".parse::<SessionStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown session status: expired");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&SessionStatus::Authenticated).unwrap();
        assert_eq!(json, "\"authenticated\"");

        let status: SessionStatus = serde_json::from_str("\"loading\"").unwrap();
        assert_eq!(status, SessionStatus::Loading);
    }

    #[test]
    fn test_from_session_payload() {
        let signed_in = json!({ "user": { "email": "a@b.c" }, "expires": "2030-01-01" });
        assert_eq!(
            SessionStatus::from_session_payload(&signed_in),
            SessionStatus::Authenticated
        );

        assert_eq!(
            SessionStatus::from_session_payload(&json!({})),
            SessionStatus::Unauthenticated
        );
        assert_eq!(
            SessionStatus::from_session_payload(&serde_json::Value::Null),
            SessionStatus::Unauthenticated
        );
        assert_eq!(
            SessionStatus::from_session_payload(&json!({ "user": null })),
            SessionStatus::Unauthenticated
        );
    }

    #[test]
    fn test_default_is_loading() {
        assert_eq!(SessionStatus::default(), SessionStatus::Loading);
        assert!(!SessionStatus::Loading.is_resolved());
        assert!(SessionStatus::Authenticated.is_resolved());
    }
}
