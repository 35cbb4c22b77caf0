//! Session store error types

use thiserror::Error;

/// Errors surfaced by the shared store connection.
///
/// `Clone` so a single connection outcome can be handed to every caller
/// that waited on the same attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Transport could not be established
    #[error("Failed to connect to store at {addr}: {message}")]
    Connect { addr: String, message: String },

    /// Handshake did not finish in time
    #[error("Store connection timed out after {0} ms")]
    Timeout(u64),

    /// An established transport went away mid-command
    #[error("Store connection lost: {0}")]
    ConnectionLost(String),

    /// The store rejected a command
    #[error("Store command failed: {0}")]
    Command(String),

    /// Reply had an unexpected shape
    #[error("Unexpected store response: {0}")]
    Response(String),

    /// `init_shared` was called after the shared connection existed
    #[error("Shared store connection already initialized")]
    AlreadyInitialized,
}

impl StoreError {
    /// Whether the next access should open a fresh transport
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            StoreError::Connect { .. } | StoreError::Timeout(_) | StoreError::ConnectionLost(_)
        )
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
