//! Client records attached to a user account.

use serde::{Deserialize, Serialize};

use crate::domain::{Entity, RecordId, reference};

/// A user commissioning work. Carries no rules beyond its owning user.
///
/// # Examples
/// ```
/// use marketplace::domain::Client;
///
/// let client: Client = serde_json::from_str("{}").expect("empty body decodes");
/// assert_eq!(
///     serde_json::to_string(&client).expect("serialise"),
///     r#"{"userId":""}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Client {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(with = "reference")]
    pub user_id: Option<RecordId>,
}

impl Entity for Client {
    const NAME: &'static str = "Client";
    const COLLECTION: &'static str = "clients";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}
