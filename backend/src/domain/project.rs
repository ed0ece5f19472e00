//! Projects linking a client with a freelancer.

use serde::{Deserialize, Serialize};

use crate::domain::entity::require_text;
use crate::domain::{Entity, EntityValidationError, RecordId, reference};

/// A piece of work a client commissions from a freelancer.
///
/// Neither reference is checked for existence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(with = "reference")]
    pub client_id: Option<RecordId>,
    #[serde(with = "reference")]
    pub freelancer_id: Option<RecordId>,
    pub title: String,
    pub description: String,
}

impl Entity for Project {
    const NAME: &'static str = "Project";
    const COLLECTION: &'static str = "projects";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), EntityValidationError> {
        require_text("title", &self.title)
    }
}
