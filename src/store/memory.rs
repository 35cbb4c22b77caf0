//! In-process store
//!
//! Map-backed transport for development and tests. Every transport opened by
//! the same connector sees the same data.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::error::{StoreError, StoreResult};
use super::transport::{Connector, StoreTransport};
use crate::config::StoreConfig;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

type Shared = Arc<Mutex<HashMap<String, Entry>>>;

/// Connector whose transports share one in-memory map
#[derive(Debug, Default, Clone)]
pub struct MemoryConnector {
    data: Shared,
    opened: Arc<AtomicU64>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transports opened so far
    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, _config: &StoreConfig) -> StoreResult<Arc<dyn StoreTransport>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MemoryTransport {
            data: Arc::clone(&self.data),
        }))
    }
}

/// Transport over the shared map
#[derive(Debug, Clone)]
pub struct MemoryTransport {
    data: Shared,
}

#[async_trait]
impl StoreTransport for MemoryTransport {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut data = self.data.lock().await;
        let now = Instant::now();

        match data.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                data.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.data.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn del(&self, key: &str) -> StoreResult<bool> {
        let now = Instant::now();
        let removed = self.data.lock().await.remove(key);
        Ok(removed.map_or(false, |entry| entry.is_live(now)))
    }

    async fn incr(&self, key: &str, delta: i64) -> StoreResult<i64> {
        let mut data = self.data.lock().await;
        let now = Instant::now();

        let (current, expires_at) = match data.get(key) {
            Some(entry) if entry.is_live(now) => {
                let current = entry.value.parse::<i64>().map_err(|_| {
                    StoreError::Command("value is not an integer or out of range".to_string())
                })?;
                (current, entry.expires_at)
            }
            _ => (0, None),
        };

        let next = current.checked_add(delta).ok_or_else(|| {
            StoreError::Command("increment or decrement would overflow".to_string())
        })?;

        data.insert(
            key.to_string(),
            Entry {
                value: next.to_string(),
                expires_at,
            },
        );
        Ok(next)
    }
}
