//! Document store connection shared by every repository.
//!
//! The driver pools connections internally; one [`MongoStore`] is built at
//! start-up and cloned into each repository.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

use super::documents::MongoDocument;
use super::error_mapping::map_mongo_error;
use super::mongo_repository::MongoEntityRepository;
use crate::domain::ports::{EntityPersistenceError, StoreHealth};

/// Application name reported to the server.
pub const APP_NAME: &str = "marketplace";

/// Connection settings for the document store.
///
/// # Example
///
/// ```
/// use marketplace::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017", "freelance-platform");
/// assert_eq!(config.database(), "freelance-platform");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
}

impl StoreConfig {
    #[must_use]
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Handle on the configured database.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Parse the connection string and build a client.
    ///
    /// The driver connects lazily; call [`StoreHealth::ping`] to confirm the
    /// server is reachable.
    pub async fn connect(config: &StoreConfig) -> Result<Self, EntityPersistenceError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(map_mongo_error)?;
        options.app_name = Some(APP_NAME.to_owned());
        let client = Client::with_options(options).map_err(map_mongo_error)?;
        info!(database = config.database(), "document store client created");
        Ok(Self {
            database: client.database(config.database()),
        })
    }

    /// Repository over the collection holding `E`.
    #[must_use]
    pub fn repository<E: MongoDocument>(&self) -> MongoEntityRepository<E> {
        MongoEntityRepository::new(self.database.collection::<E::Row>(E::COLLECTION))
    }
}

#[async_trait]
impl StoreHealth for MongoStore {
    async fn ping(&self) -> Result<(), EntityPersistenceError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(map_mongo_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn malformed_uri_is_rejected_before_connecting() {
        let config = StoreConfig::new("postgres://localhost", "freelance-platform");
        let err = MongoStore::connect(&config)
            .await
            .err()
            .expect("scheme must be mongodb");
        assert!(matches!(err, EntityPersistenceError::Query { .. }));
    }

    #[rstest]
    fn config_exposes_its_parts() {
        let config = StoreConfig::new("mongodb://db:27017", "marketplace-test");
        assert_eq!(config.uri(), "mongodb://db:27017");
        assert_eq!(config.database(), "marketplace-test");
    }
}
