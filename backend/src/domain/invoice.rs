//! Invoices raised by freelancers against projects.

use serde::{Deserialize, Serialize};

use crate::domain::{Entity, EntityValidationError, RecordId, reference};

/// A bill for work on a project. `status` is free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Invoice {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(with = "reference")]
    pub project_id: Option<RecordId>,
    #[serde(with = "reference")]
    pub freelancer_id: Option<RecordId>,
    pub amount: f64,
    pub status: String,
}

impl Entity for Invoice {
    const NAME: &'static str = "Invoice";
    const COLLECTION: &'static str = "invoices";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), EntityValidationError> {
        if !(self.amount.is_finite() && self.amount >= 0.0) {
            return Err(EntityValidationError::new(
                "amount",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}
