//! HTTP inbound adapter exposing the resource endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod resources;
pub mod state;

pub use error::{ApiResult, ErrorBody};
