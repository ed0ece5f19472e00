//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod entity_repository;
mod request_authenticator;
mod store_health;

pub use entity_repository::{EntityPersistenceError, EntityRepository};
#[cfg(test)]
pub use request_authenticator::MockRequestAuthenticator;
pub use request_authenticator::{RequestAuthenticator, RequestCredentials};
#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::StoreHealth;
