//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route. The
//! authentication gate lives with the HTTP adapter because it depends on the
//! authenticator port.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
