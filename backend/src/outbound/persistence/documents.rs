//! Stored document shapes for each entity.
//!
//! Rows are internal to the adapter: they carry `_id` as a native object id,
//! references as object ids (or null when unset) and timestamps as BSON
//! dates. Older documents that encode an unset reference as the all-zero
//! object id read back as unset.

use chrono::{DateTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{Client, Entity, Freelancer, Invoice, Profile, Project, RecordId, User};

/// An [`Entity`] with a stored document representation.
pub trait MongoDocument: Entity {
    /// Document shape in the collection.
    type Row: Serialize + DeserializeOwned + Unpin + Send + Sync + 'static;

    /// Fields a replacement write leaves untouched.
    const PRESERVED_FIELDS: &'static [&'static str] = &[];

    /// Encode for storage. The row never carries `_id`.
    fn to_row(&self) -> Self::Row;

    /// Decode a stored document.
    fn from_row(row: Self::Row) -> Self;
}

pub(crate) fn to_object_id(id: RecordId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

pub(crate) fn from_object_id(oid: ObjectId) -> RecordId {
    RecordId::from_bytes(oid.bytes())
}

fn reference_to_row(reference: Option<RecordId>) -> Option<ObjectId> {
    reference.map(to_object_id)
}

fn reference_from_row(stored: Option<ObjectId>) -> Option<RecordId> {
    stored
        .filter(|oid| oid.bytes() != [0; 12])
        .map(from_object_id)
}

fn timestamp_to_row(at: Option<DateTime<Utc>>) -> Option<BsonDateTime> {
    at.map(|at| BsonDateTime::from_millis(at.timestamp_millis()))
}

fn timestamp_from_row(stored: Option<BsonDateTime>) -> Option<DateTime<Utc>> {
    stored.and_then(|at| DateTime::from_timestamp_millis(at.timestamp_millis()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password: String,
    pub role: String,
    pub profile: Profile,
    pub created_at: Option<BsonDateTime>,
    pub updated_at: Option<BsonDateTime>,
}

impl MongoDocument for User {
    type Row = UserRow;

    const PRESERVED_FIELDS: &'static [&'static str] = &["createdAt"];

    fn to_row(&self) -> UserRow {
        UserRow {
            id: None,
            username: self.username.clone(),
            password: self.password.clone(),
            role: self.role.clone(),
            profile: self.profile.clone(),
            created_at: timestamp_to_row(self.created_at),
            updated_at: timestamp_to_row(self.updated_at),
        }
    }

    fn from_row(row: UserRow) -> Self {
        Self {
            id: row.id.map(from_object_id),
            username: row.username,
            password: row.password,
            role: row.role,
            profile: row.profile,
            created_at: timestamp_from_row(row.created_at),
            updated_at: timestamp_from_row(row.updated_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FreelancerRow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: Option<ObjectId>,
    pub skills: Vec<String>,
}

impl MongoDocument for Freelancer {
    type Row = FreelancerRow;

    fn to_row(&self) -> FreelancerRow {
        FreelancerRow {
            id: None,
            user_id: reference_to_row(self.user_id),
            skills: self.skills.clone(),
        }
    }

    fn from_row(row: FreelancerRow) -> Self {
        Self {
            id: row.id.map(from_object_id),
            user_id: reference_from_row(row.user_id),
            skills: row.skills,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientRow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: Option<ObjectId>,
}

impl MongoDocument for Client {
    type Row = ClientRow;

    fn to_row(&self) -> ClientRow {
        ClientRow {
            id: None,
            user_id: reference_to_row(self.user_id),
        }
    }

    fn from_row(row: ClientRow) -> Self {
        Self {
            id: row.id.map(from_object_id),
            user_id: reference_from_row(row.user_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectRow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub client_id: Option<ObjectId>,
    pub freelancer_id: Option<ObjectId>,
    pub title: String,
    pub description: String,
}

impl MongoDocument for Project {
    type Row = ProjectRow;

    fn to_row(&self) -> ProjectRow {
        ProjectRow {
            id: None,
            client_id: reference_to_row(self.client_id),
            freelancer_id: reference_to_row(self.freelancer_id),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }

    fn from_row(row: ProjectRow) -> Self {
        Self {
            id: row.id.map(from_object_id),
            client_id: reference_from_row(row.client_id),
            freelancer_id: reference_from_row(row.freelancer_id),
            title: row.title,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceRow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_id: Option<ObjectId>,
    pub freelancer_id: Option<ObjectId>,
    pub amount: f64,
    pub status: String,
}

impl MongoDocument for Invoice {
    type Row = InvoiceRow;

    fn to_row(&self) -> InvoiceRow {
        InvoiceRow {
            id: None,
            project_id: reference_to_row(self.project_id),
            freelancer_id: reference_to_row(self.freelancer_id),
            amount: self.amount,
            status: self.status.clone(),
        }
    }

    fn from_row(row: InvoiceRow) -> Self {
        Self {
            id: row.id.map(from_object_id),
            project_id: reference_from_row(row.project_id),
            freelancer_id: reference_from_row(row.freelancer_id),
            amount: row.amount,
            status: row.status,
        }
    }
}
