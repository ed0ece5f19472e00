//! MongoDB persistence adapters.
//!
//! - **Thin adapters**: repositories only translate between stored documents
//!   and domain records. No business logic resides here.
//! - **Internal rows**: document shapes (`documents.rs`) stay inside the
//!   adapter; the domain never sees BSON types.
//! - **Strongly typed errors**: driver errors are mapped to
//!   [`EntityPersistenceError`](crate::domain::ports::EntityPersistenceError).
//!
//! # Example
//!
//! ```no_run
//! use marketplace::domain::Client;
//! use marketplace::outbound::persistence::{MongoStore, StoreConfig};
//!
//! # async fn demo() -> Result<(), marketplace::domain::ports::EntityPersistenceError> {
//! let config = StoreConfig::new("mongodb://localhost:27017", "freelance-platform");
//! let store = MongoStore::connect(&config).await?;
//! let _clients = store.repository::<Client>();
//! # Ok(())
//! # }
//! ```

mod documents;
mod error_mapping;
mod mongo_repository;
mod store;

pub use documents::{ClientRow, FreelancerRow, InvoiceRow, MongoDocument, ProjectRow, UserRow};
pub use mongo_repository::{MongoEntityRepository, replacement_fields};
pub use store::{APP_NAME, MongoStore, StoreConfig};
