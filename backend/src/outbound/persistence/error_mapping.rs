//! Shared driver error mapping for the document store adapters.

use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::debug;

use crate::domain::ports::EntityPersistenceError;

/// Map a driver error onto the repository port's connection/query split.
///
/// Failures to reach a server become connection errors; everything else,
/// including rejected writes and undecodable documents, is a query error.
#[must_use]
pub fn map_mongo_error(error: MongoError) -> EntityPersistenceError {
    debug!(error = %error, "document store operation failed");
    let message = error.to_string();
    match *error.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => EntityPersistenceError::connection(message),
        _ => EntityPersistenceError::query(message),
    }
}

/// Map a document encoding failure onto a query error.
#[must_use]
pub fn map_encode_error(error: mongodb::bson::ser::Error) -> EntityPersistenceError {
    EntityPersistenceError::query(format!("failed to encode document: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use rstest::rstest;

    #[rstest]
    fn io_failures_are_connection_errors() {
        let error = MongoError::from(std::io::Error::other("connection reset"));
        let mapped = map_mongo_error(error);
        assert!(matches!(mapped, EntityPersistenceError::Connection { .. }));
        assert!(mapped.to_string().contains("connection reset"));
    }

    #[rstest]
    fn decode_failures_are_query_errors() {
        let decode = mongodb::bson::from_document::<String>(doc! { "unexpected": 1 })
            .expect_err("a document is not a string");
        let mapped = map_mongo_error(MongoError::from(decode));
        assert!(matches!(mapped, EntityPersistenceError::Query { .. }));
    }
}
