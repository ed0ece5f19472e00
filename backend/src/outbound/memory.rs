//! In-process record store used by tests and local experiments.
//!
//! Records live in insertion order behind a [`RwLock`]; the lock is never
//! held across an await point. Identifiers are generated the same way the
//! document store generates them, so they are indistinguishable on the wire.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::ports::{EntityPersistenceError, EntityRepository, StoreHealth};
use crate::domain::{Entity, RecordId};

/// Lock-protected, insertion-ordered collection of `E` records.
///
/// # Examples
/// ```
/// use marketplace::domain::Client;
/// use marketplace::domain::ports::EntityRepository;
/// use marketplace::outbound::memory::InMemoryEntityRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repository = InMemoryEntityRepository::<Client>::default();
/// let id = repository.insert(&Client::default()).await.expect("insert");
/// let stored = repository.find_by_id(&id).await.expect("find");
/// assert_eq!(stored.and_then(|client| client.id), Some(id));
/// # });
/// ```
pub struct InMemoryEntityRepository<E> {
    records: RwLock<Vec<E>>,
}

impl<E> Default for InMemoryEntityRepository<E> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> EntityPersistenceError {
    EntityPersistenceError::query("in-memory store lock poisoned")
}

fn fresh_id() -> RecordId {
    RecordId::from_bytes(ObjectId::new().bytes())
}

impl<E: Entity> InMemoryEntityRepository<E> {
    /// Number of stored records.
    pub fn len(&self) -> Result<usize, EntityPersistenceError> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> Result<bool, EntityPersistenceError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for InMemoryEntityRepository<E> {
    async fn list(&self) -> Result<Vec<E>, EntityPersistenceError> {
        Ok(self.records.read().map_err(poisoned)?.clone())
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<E>, EntityPersistenceError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .iter()
            .find(|record| record.id().as_ref() == Some(id))
            .cloned())
    }

    async fn insert(&self, entity: &E) -> Result<RecordId, EntityPersistenceError> {
        let id = fresh_id();
        let mut record = entity.clone();
        record.set_id(id);
        self.records.write().map_err(poisoned)?.push(record);
        Ok(id)
    }

    async fn replace_fields(
        &self,
        id: &RecordId,
        entity: &E,
    ) -> Result<bool, EntityPersistenceError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let Some(slot) = records
            .iter_mut()
            .find(|record| record.id().as_ref() == Some(id))
        else {
            return Ok(false);
        };
        let mut replacement = entity.clone();
        replacement.retain_server_fields(slot);
        replacement.set_id(*id);
        *slot = replacement;
        Ok(true)
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, EntityPersistenceError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|record| record.id().as_ref() != Some(id));
        Ok(records.len() < before)
    }
}

#[async_trait]
impl<E: Entity> StoreHealth for InMemoryEntityRepository<E> {
    async fn ping(&self) -> Result<(), EntityPersistenceError> {
        self.records.read().map_err(poisoned).map(|_| ())
    }
}
