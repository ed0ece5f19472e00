//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{EntityPersistenceError, EntityRepository, StoreHealth};
use crate::domain::{Entity, RecordId};

/// Clock frozen at a chosen instant until advanced.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Store double failing every call as if the server were unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

/// Error text reported by [`UnavailableStore`].
pub const UNAVAILABLE_MESSAGE: &str = "store connection failed: server selection timeout";

fn unavailable() -> EntityPersistenceError {
    EntityPersistenceError::connection("server selection timeout")
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for UnavailableStore {
    async fn list(&self) -> Result<Vec<E>, EntityPersistenceError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: &RecordId) -> Result<Option<E>, EntityPersistenceError> {
        Err(unavailable())
    }

    async fn insert(&self, _entity: &E) -> Result<RecordId, EntityPersistenceError> {
        Err(unavailable())
    }

    async fn replace_fields(
        &self,
        _id: &RecordId,
        _entity: &E,
    ) -> Result<bool, EntityPersistenceError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: &RecordId) -> Result<bool, EntityPersistenceError> {
        Err(unavailable())
    }
}

#[async_trait]
impl StoreHealth for UnavailableStore {
    async fn ping(&self) -> Result<(), EntityPersistenceError> {
        Err(unavailable())
    }
}
