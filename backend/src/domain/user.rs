//! Platform accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::require_text;
use crate::domain::{Entity, EntityValidationError, RecordId};

/// Personal details shown on a user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
}

/// A platform account.
///
/// `password` is write-only: it is accepted from requests and persisted, but
/// never rendered back. `createdAt` and `updatedAt` are server-managed and any
/// client-supplied value is ignored.
///
/// # Examples
/// ```
/// use marketplace::domain::User;
///
/// let user: User = serde_json::from_str(
///     r#"{"username":"ada","password":"secret","role":"client"}"#,
/// )
/// .expect("valid user");
/// let rendered = serde_json::to_value(&user).expect("serialise");
/// assert!(rendered.get("password").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub profile: Profile,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for User {
    const NAME: &'static str = "User";
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), EntityValidationError> {
        require_text("username", &self.username)?;
        require_text("role", &self.role)
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    fn retain_server_fields(&mut self, stored: &Self) {
        self.created_at = stored.created_at;
    }
}
