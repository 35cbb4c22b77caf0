//! Transport seam
//!
//! The connection lifecycle only talks to these traits, so the wire client
//! can be swapped (Redis in production, an in-process map in tests).

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::error::StoreResult;
use crate::config::StoreConfig;

/// One established transport to the store
#[async_trait]
pub trait StoreTransport: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value`, expiring after `ttl` when given
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()>;

    /// Returns whether the key existed
    async fn del(&self, key: &str) -> StoreResult<bool>;

    /// Atomically add `delta`, returning the new value
    async fn incr(&self, key: &str, delta: i64) -> StoreResult<i64>;
}

/// Opens transports. Each call is exactly one network attempt.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, config: &StoreConfig) -> StoreResult<Arc<dyn StoreTransport>>;
}
