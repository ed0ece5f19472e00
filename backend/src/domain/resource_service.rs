//! Generic create/read/update/delete use-cases shared by every entity.
//!
//! Each operation validates its input, performs exactly one repository call
//! and maps the outcome onto the domain [`Error`] taxonomy:
//!
//! - validation failures become [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest);
//! - "nothing matched" becomes a fixed `"<Entity> not found"` message;
//! - store failures become internal errors carrying the store's text, except
//!   on single-record reads, which answer "not found" after logging the
//!   failure.

use std::marker::PhantomData;
use std::sync::Arc;

use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{EntityPersistenceError, EntityRepository};
use crate::domain::{Entity, EntityValidationError, Error, RecordId};

/// Use-case service for the records of one entity type.
///
/// Cheap to clone; clones share the repository and clock.
pub struct ResourceService<E> {
    repository: Arc<dyn EntityRepository<E>>,
    clock: Arc<dyn Clock>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            _entity: PhantomData,
        }
    }
}

/// Message returned when no record of `E` matches an identifier.
#[must_use]
pub fn not_found_message<E: Entity>() -> String {
    format!("{} not found", E::NAME)
}

fn not_found<E: Entity>() -> Error {
    Error::not_found(not_found_message::<E>())
}

fn invalid(err: &EntityValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

fn store_failure<E: Entity>(operation: &'static str, err: &EntityPersistenceError) -> Error {
    error!(
        entity = E::NAME,
        operation,
        error = %err,
        "store operation failed"
    );
    Error::internal(err.to_string())
}

impl<E: Entity> ResourceService<E> {
    /// Build a service over `repository`, stamping server-managed fields from
    /// `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use marketplace::domain::{Client, ResourceService};
    /// use marketplace::outbound::memory::InMemoryEntityRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service: ResourceService<Client> = ResourceService::new(
    ///     Arc::new(InMemoryEntityRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    #[must_use]
    pub fn new(repository: Arc<dyn EntityRepository<E>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            _entity: PhantomData,
        }
    }

    /// Every record of `E`.
    pub async fn list(&self) -> Result<Vec<E>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| store_failure::<E>("list", &err))
    }

    /// The record with `id`.
    ///
    /// A failed lookup is reported as "not found"; the store error is only
    /// logged.
    pub async fn get(&self, id: &RecordId) -> Result<E, Error> {
        match self.repository.find_by_id(id).await {
            Ok(record) => record.ok_or_else(not_found::<E>),
            Err(err) => {
                error!(
                    entity = E::NAME,
                    operation = "get",
                    %id,
                    error = %err,
                    "store lookup failed"
                );
                Err(not_found::<E>())
            }
        }
    }

    /// Validate and insert `entity`, returning the store-assigned identifier.
    pub async fn create(&self, mut entity: E) -> Result<RecordId, Error> {
        entity.validate().map_err(|err| invalid(&err))?;
        entity.stamp_created(self.clock.utc());
        let id = self
            .repository
            .insert(&entity)
            .await
            .map_err(|err| store_failure::<E>("create", &err))?;
        info!(entity = E::NAME, %id, "record created");
        Ok(id)
    }

    /// Replace every client-writable field of the record with `id`.
    ///
    /// Fields left at their zero value in `entity` overwrite stored values.
    pub async fn update(&self, id: &RecordId, mut entity: E) -> Result<(), Error> {
        entity.validate().map_err(|err| invalid(&err))?;
        entity.stamp_updated(self.clock.utc());
        let matched = self
            .repository
            .replace_fields(id, &entity)
            .await
            .map_err(|err| store_failure::<E>("update", &err))?;
        if !matched {
            return Err(not_found::<E>());
        }
        info!(entity = E::NAME, %id, "record updated");
        Ok(())
    }

    /// Delete the record with `id`.
    pub async fn delete(&self, id: &RecordId) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(|err| store_failure::<E>("delete", &err))?;
        if !deleted {
            return Err(not_found::<E>());
        }
        info!(entity = E::NAME, %id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
