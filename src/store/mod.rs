//! Session Store
//!
//! One lazily connected store client shared by the whole process (session
//! caching, rate-limit counters and similar consumers).
//!
//! ## Architecture
//!
//! - **StoreConnection**: connect-once lifecycle with retry on demand
//! - **Connector / StoreTransport**: seam between lifecycle and wire client
//! - **RedisConnector**: production transport
//! - **MemoryConnector**: in-process transport for development and tests
//!
//! A failing store never takes the process down: operations return a
//! recoverable [`StoreError`] and the next access tries again.

mod connection;
mod error;
mod memory;
mod remote;
mod transport;

pub use connection::{ConnectionState, StoreConnection, StoreHandle};
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryConnector, MemoryTransport};
pub use remote::RedisConnector;
pub use transport::{Connector, StoreTransport};

use std::sync::{Arc, OnceLock};

use crate::config::StoreConfig;

static SHARED: OnceLock<StoreConnection> = OnceLock::new();

/// The process-wide connection, built from the environment on first use
pub fn shared() -> &'static StoreConnection {
    SHARED.get_or_init(|| StoreConnection::new(StoreConfig::from_env(), Arc::new(RedisConnector)))
}

/// Install the process-wide connection explicitly.
///
/// Must run before anything calls [`shared`]; afterwards the existing
/// connection stays in place and `AlreadyInitialized` is returned.
pub fn init_shared(
    config: StoreConfig,
    connector: Arc<dyn Connector>,
) -> StoreResult<&'static StoreConnection> {
    let mut installed = false;
    let conn = SHARED.get_or_init(|| {
        installed = true;
        StoreConnection::new(config, connector)
    });

    if installed {
        tracing::debug!(addr = %conn.config().addr(), "Shared store connection installed");
        Ok(conn)
    } else {
        Err(StoreError::AlreadyInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test touching the process-wide slot
    #[tokio::test]
    async fn test_shared_is_single_instance() {
        let config = StoreConfig {
            host: "memory".to_string(),
            ..Default::default()
        };
        let conn = init_shared(config, Arc::new(MemoryConnector::new())).unwrap();

        assert!(std::ptr::eq(conn, shared()));
        assert_eq!(shared().config().host, "memory");

        let again = init_shared(StoreConfig::default(), Arc::new(MemoryConnector::new()));
        assert_eq!(again.unwrap_err(), StoreError::AlreadyInitialized);

        shared().set("k", "v", None).await.unwrap();
        assert_eq!(shared().get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(shared().attempts(), 1);
    }
}
