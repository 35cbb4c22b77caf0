//! Auth API
//!
//! Read-only access to the auth provider's session endpoint.

pub mod session;

pub use session::fetch_session_status;
