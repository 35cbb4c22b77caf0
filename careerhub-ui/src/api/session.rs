//! Session endpoint client

use careerhub::SessionStatus;
use gloo_net::http::Request;

/// Session endpoint of the auth provider
pub const SESSION_ENDPOINT: &str = "/api/auth/session";

/// Resolve the visitor's session status.
///
/// Any failure resolves to `Unauthenticated`: the login controls are the
/// only safe thing to offer when the provider cannot be reached.
pub async fn fetch_session_status() -> SessionStatus {
    let response = match Request::get(SESSION_ENDPOINT).send().await {
        Ok(response) if response.ok() => response,
        Ok(response) => {
            web_sys::console::warn_1(
                &format!("Session endpoint answered {}", response.status()).into(),
            );
            return SessionStatus::Unauthenticated;
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("Session request failed: {}", e).into());
            return SessionStatus::Unauthenticated;
        }
    };

    match response.json::<serde_json::Value>().await {
        Ok(body) => SessionStatus::from_session_payload(&body),
        Err(e) => {
            web_sys::console::warn_1(&format!("Invalid session payload: {}", e).into());
            SessionStatus::Unauthenticated
        }
    }
}
