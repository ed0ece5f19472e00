//! Document store implementation of the record repository port.
//!
//! Each port call maps to a single driver operation on the entity's
//! collection. Replacement writes `$set` every stored field except `_id` and
//! the entity's preserved fields.

use std::marker::PhantomData;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc, to_document};

use super::documents::{MongoDocument, from_object_id, to_object_id};
use super::error_mapping::{map_encode_error, map_mongo_error};
use crate::domain::RecordId;
use crate::domain::ports::{EntityPersistenceError, EntityRepository};

/// Repository over one typed collection.
pub struct MongoEntityRepository<E: MongoDocument> {
    collection: Collection<E::Row>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: MongoDocument> Clone for MongoEntityRepository<E> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: MongoDocument> MongoEntityRepository<E> {
    #[must_use]
    pub fn new(collection: Collection<E::Row>) -> Self {
        Self {
            collection,
            _entity: PhantomData,
        }
    }
}

fn by_id(id: &RecordId) -> Document {
    doc! { "_id": to_object_id(*id) }
}

/// Build the `$set` payload for a replacement write of `entity`.
pub fn replacement_fields<E: MongoDocument>(
    entity: &E,
) -> Result<Document, EntityPersistenceError> {
    let mut fields = to_document(&entity.to_row()).map_err(map_encode_error)?;
    fields.remove("_id");
    for preserved in E::PRESERVED_FIELDS {
        fields.remove(*preserved);
    }
    Ok(fields)
}

#[async_trait]
impl<E: MongoDocument> EntityRepository<E> for MongoEntityRepository<E> {
    async fn list(&self) -> Result<Vec<E>, EntityPersistenceError> {
        let rows: Vec<E::Row> = self
            .collection
            .find(doc! {})
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;
        Ok(rows.into_iter().map(E::from_row).collect())
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<E>, EntityPersistenceError> {
        let row = self
            .collection
            .find_one(by_id(id))
            .await
            .map_err(map_mongo_error)?;
        Ok(row.map(E::from_row))
    }

    async fn insert(&self, entity: &E) -> Result<RecordId, EntityPersistenceError> {
        let result = self
            .collection
            .insert_one(entity.to_row())
            .await
            .map_err(map_mongo_error)?;
        result
            .inserted_id
            .as_object_id()
            .map(from_object_id)
            .ok_or_else(|| {
                EntityPersistenceError::query(format!(
                    "store assigned a non-object-id identifier: {}",
                    result.inserted_id
                ))
            })
    }

    async fn replace_fields(
        &self,
        id: &RecordId,
        entity: &E,
    ) -> Result<bool, EntityPersistenceError> {
        let fields = replacement_fields(entity)?;
        let result = self
            .collection
            .update_one(by_id(id), doc! { "$set": fields })
            .await
            .map_err(map_mongo_error)?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, EntityPersistenceError> {
        let result = self
            .collection
            .delete_one(by_id(id))
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count > 0)
    }
}
