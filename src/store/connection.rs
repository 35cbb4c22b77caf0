//! Shared Store Connection
//!
//! Lazily connected, process-wide handle to the session store.
//!
//! State machine:
//!
//! ```text
//!   Closed ──connect──▶ Connecting ──ok──▶ Open
//!                          │                 │ connection lost
//!                          └──err──▶ Errored ◀┘
//!                                      │
//!                    next access ──────┘──▶ Connecting
//! ```
//!
//! Concurrent callers that find the connection `Connecting` await the same
//! in-flight attempt, so one burst of callers costs exactly one transport.
//! Each attempt runs on its own task and settles the slot itself, so it
//! completes even when every caller waiting on it is dropped.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::error::{StoreError, StoreResult};
use super::transport::{Connector, StoreTransport};
use crate::config::StoreConfig;

/// Observable lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Closed,
    Connecting,
    Open,
    Errored,
}

/// Cheap, cloneable handle to an established transport
#[derive(Clone)]
pub struct StoreHandle {
    attempt: u64,
    transport: Arc<dyn StoreTransport>,
}

impl StoreHandle {
    /// Connection attempt that produced this handle
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Whether both handles wrap the same transport
    pub fn same_transport(&self, other: &StoreHandle) -> bool {
        self.attempt == other.attempt && Arc::ptr_eq(&self.transport, &other.transport)
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.transport.ping().await
    }

    pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.transport.get(key).await
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        self.transport.set(key, value, ttl).await
    }

    pub async fn del(&self, key: &str) -> StoreResult<bool> {
        self.transport.del(key).await
    }

    pub async fn incr(&self, key: &str, delta: i64) -> StoreResult<i64> {
        self.transport.incr(key, delta).await
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("attempt", &self.attempt)
            .finish_non_exhaustive()
    }
}

type PendingConnect = Shared<BoxFuture<'static, StoreResult<StoreHandle>>>;

enum Slot {
    Closed,
    Connecting { attempt: u64, pending: PendingConnect },
    Open { handle: StoreHandle },
    Errored { error: StoreError },
}

impl Slot {
    fn state(&self) -> ConnectionState {
        match self {
            Slot::Closed => ConnectionState::Closed,
            Slot::Connecting { .. } => ConnectionState::Connecting,
            Slot::Open { .. } => ConnectionState::Open,
            Slot::Errored { .. } => ConnectionState::Errored,
        }
    }
}

/// Process-wide store connection. Consumers share it and never close it.
pub struct StoreConnection {
    config: StoreConfig,
    connector: Arc<dyn Connector>,
    slot: Arc<Mutex<Slot>>,
    attempts: AtomicU64,
}

impl std::fmt::Debug for StoreConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConnection")
            .field("config", &self.config)
            .field("attempts", &self.attempts())
            .finish_non_exhaustive()
    }
}

impl StoreConnection {
    /// Create a closed connection. Nothing touches the network until first use.
    pub fn new(config: StoreConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            config,
            connector,
            slot: Arc::new(Mutex::new(Slot::Closed)),
            attempts: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub async fn state(&self) -> ConnectionState {
        self.slot.lock().await.state()
    }

    /// Error recorded by the last failed attempt, while `Errored`
    pub async fn last_error(&self) -> Option<StoreError> {
        match &*self.slot.lock().await {
            Slot::Errored { error } => Some(error.clone()),
            _ => None,
        }
    }

    /// Transport attempts issued so far
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Return the open handle, joining or starting a connection attempt as needed.
    ///
    /// Callers arriving while an attempt is in flight observe that attempt's
    /// outcome instead of starting their own.
    pub async fn connect(&self) -> StoreResult<StoreHandle> {
        let pending = {
            let mut slot = self.slot.lock().await;

            let in_flight = match &*slot {
                Slot::Open { handle } => return Ok(handle.clone()),
                Slot::Connecting { pending, .. } => Some(pending.clone()),
                Slot::Closed | Slot::Errored { .. } => None,
            };

            match in_flight {
                Some(joined) => joined,
                None => {
                    let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    // The spawned attempt waits on this lock before settling
                    let pending = self.begin_attempt(attempt);
                    *slot = Slot::Connecting {
                        attempt,
                        pending: pending.clone(),
                    };
                    pending
                }
            }
        };

        pending.await
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.run(|handle| async move { handle.ping().await }).await
    }

    pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.run(|handle| async move { handle.get(key).await }).await
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        self.run(|handle| async move { handle.set(key, value, ttl).await })
            .await
    }

    pub async fn del(&self, key: &str) -> StoreResult<bool> {
        self.run(|handle| async move { handle.del(key).await }).await
    }

    pub async fn incr(&self, key: &str, delta: i64) -> StoreResult<i64> {
        self.run(|handle| async move { handle.incr(key, delta).await })
            .await
    }

    /// Connect on demand, run `op`, and retire the transport if it was lost
    async fn run<T, F, Fut>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(StoreHandle) -> Fut,
        Fut: Future<Output = StoreResult<T>>,
    {
        let handle = self.connect().await?;
        let attempt = handle.attempt;
        let result = op(handle).await;

        if let Err(error) = &result {
            if error.is_connection_error() {
                self.retire(attempt, error).await;
            }
        }
        result
    }

    /// Spawn attempt number `attempt` and return a future shared by its waiters
    fn begin_attempt(&self, attempt: u64) -> PendingConnect {
        let connector = Arc::clone(&self.connector);
        let config = self.config.clone();
        let slot = Arc::clone(&self.slot);
        let addr = config.addr();

        let task = tokio::spawn(async move {
            let addr = config.addr();
            tracing::info!(%addr, attempt, "Connecting to session store");

            let timeout = Duration::from_millis(config.connect_timeout_ms);
            let result = match tokio::time::timeout(timeout, connector.connect(&config)).await {
                Ok(result) => result,
                Err(_) => Err(StoreError::Timeout(config.connect_timeout_ms)),
            };

            let outcome = match result {
                Ok(transport) => {
                    tracing::info!(%addr, attempt, "Connected to session store");
                    Ok(StoreHandle { attempt, transport })
                }
                Err(error) => {
                    tracing::error!(%addr, attempt, %error, "Session store connection error");
                    Err(error)
                }
            };

            settle(&slot, attempt, &outcome).await;
            outcome
        });

        task.map(move |joined| {
            joined.unwrap_or_else(|e| {
                Err(StoreError::Connect {
                    addr,
                    message: format!("connect task failed: {}", e),
                })
            })
        })
        .boxed()
        .shared()
    }

    /// Mark the open transport from `attempt` as lost
    async fn retire(&self, attempt: u64, error: &StoreError) {
        let mut slot = self.slot.lock().await;

        let current = matches!(&*slot, Slot::Open { handle } if handle.attempt == attempt);
        if current {
            tracing::warn!(
                attempt,
                %error,
                "Session store transport lost, will reconnect on next access"
            );
            *slot = Slot::Errored {
                error: error.clone(),
            };
        }
    }
}

/// Record the outcome of `attempt` unless a newer attempt replaced it
async fn settle(slot: &Mutex<Slot>, attempt: u64, outcome: &StoreResult<StoreHandle>) {
    let mut slot = slot.lock().await;

    let current = matches!(&*slot, Slot::Connecting { attempt: a, .. } if *a == attempt);
    if current {
        *slot = match outcome {
            Ok(handle) => Slot::Open {
                handle: handle.clone(),
            },
            Err(error) => Slot::Errored {
                error: error.clone(),
            },
        };
    }
}
