//! Domain primitives, record types and use-cases.
//!
//! Purpose: define the marketplace records, their validation rules and the
//! generic service that drives every resource. Nothing here knows about HTTP
//! or the document store; adapters talk to the domain through [`ports`].
//!
//! Public surface:
//! - [`RecordId`]: 12-byte store identifier rendered as 24 hex characters.
//! - [`Entity`]: contract implemented by [`User`], [`Freelancer`], [`Client`],
//!   [`Project`] and [`Invoice`].
//! - [`ResourceService`]: list/get/create/update/delete for one entity.
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failures.

pub mod auth;
pub mod client;
pub mod entity;
pub mod error;
pub mod freelancer;
pub mod invoice;
pub mod ports;
pub mod project;
pub mod record_id;
pub mod resource_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{AllowAllAuthenticator, BearerTokenAuthenticator};
pub use self::client::Client;
pub use self::entity::{Entity, EntityValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::freelancer::Freelancer;
pub use self::invoice::Invoice;
pub use self::project::Project;
pub use self::record_id::{RECORD_ID_LEN, RecordId, RecordIdError, reference};
pub use self::resource_service::{ResourceService, not_found_message};
pub use self::trace_id::TraceId;
pub use self::user::{Profile, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use marketplace::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("User not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
