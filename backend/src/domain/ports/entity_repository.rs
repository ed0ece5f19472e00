//! Driven port for single-collection record persistence.
//!
//! One implementation serves every [`Entity`]; each call maps to exactly one
//! store operation. Adapters report "nothing matched" through return values,
//! never through errors.

use async_trait::async_trait;

use crate::domain::{Entity, RecordId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by record repository adapters.
    pub enum EntityPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "store connection failed: {message}",
        /// The store rejected or failed to execute the operation.
        Query { message: String } => "store query failed: {message}",
    }
}

/// Persistence operations for the records of one collection.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Every record in the collection, in store order.
    async fn list(&self) -> Result<Vec<E>, EntityPersistenceError>;

    /// The record with `id`, if one exists.
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<E>, EntityPersistenceError>;

    /// Insert `entity`, ignoring any identifier it carries, and return the
    /// identifier the store assigned.
    async fn insert(&self, entity: &E) -> Result<RecordId, EntityPersistenceError>;

    /// Overwrite every client-writable field of the record with `id`.
    ///
    /// Returns `false` when no record matched.
    async fn replace_fields(
        &self,
        id: &RecordId,
        entity: &E,
    ) -> Result<bool, EntityPersistenceError>;

    /// Delete the record with `id`.
    ///
    /// Returns `false` when no record was deleted.
    async fn delete(&self, id: &RecordId) -> Result<bool, EntityPersistenceError>;
}
