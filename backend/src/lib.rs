//! Freelance marketplace backend library.
//!
//! The binary wires these modules together; integration tests drive the same
//! HTTP surface against the in-memory adapter.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
