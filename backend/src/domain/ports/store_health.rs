//! Driven port used by readiness probes to check the store.

use async_trait::async_trait;

use super::EntityPersistenceError;

/// Reachability check for the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Succeeds when the store answers a round trip.
    async fn ping(&self) -> Result<(), EntityPersistenceError>;
}
