//! The contract every persisted record type fulfils.
//!
//! Resource handling is written once against [`Entity`]; each concrete record
//! type only supplies its names, identifier access and validation rules.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::RecordId;

/// A field-level validation failure raised by [`Entity::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} {reason}")]
pub struct EntityValidationError {
    field: &'static str,
    reason: &'static str,
}

impl EntityValidationError {
    /// Describe why `field` is unacceptable.
    #[must_use]
    pub const fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }

    /// Reject a field that must carry visible text.
    #[must_use]
    pub const fn blank(field: &'static str) -> Self {
        Self::new(field, "must not be blank")
    }

    /// JSON name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }
}

/// Reject `value` when it is empty once trimmed.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), EntityValidationError> {
    if value.trim().is_empty() {
        Err(EntityValidationError::blank(field))
    } else {
        Ok(())
    }
}

/// A record type stored in its own collection.
///
/// The identifier is never read from client input: implementors mark the
/// field `skip_deserializing` so any `id` in a request body is ignored.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human-facing singular name, used in "not found" messages.
    const NAME: &'static str;
    /// Collection holding every record of this type; also the route prefix.
    const COLLECTION: &'static str;

    /// Store-assigned identifier, absent until the record is inserted.
    fn id(&self) -> Option<RecordId>;

    /// Attach the identifier assigned by the store.
    fn set_id(&mut self, id: RecordId);

    /// Check the record before it is written.
    fn validate(&self) -> Result<(), EntityValidationError> {
        Ok(())
    }

    /// Populate server-managed fields for a new record.
    fn stamp_created(&mut self, _now: DateTime<Utc>) {}

    /// Populate server-managed fields for a replacement write.
    fn stamp_updated(&mut self, _now: DateTime<Utc>) {}

    /// Copy server-managed fields that a replacement write must not touch.
    fn retain_server_fields(&mut self, _stored: &Self) {}
}
