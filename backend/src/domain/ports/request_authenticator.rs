//! Port for the authentication gate run before every resource handler.
//!
//! The HTTP adapter extracts [`RequestCredentials`] and asks the configured
//! [`RequestAuthenticator`] whether the request may proceed. Swapping the
//! implementation changes the policy without touching any handler.

use crate::domain::Error;

/// Credentials presented by a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCredentials {
    bearer_token: Option<String>,
}

impl RequestCredentials {
    /// Credentials carrying no token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Credentials carrying a bearer token.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
        }
    }

    /// Bearer token, when one was supplied.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

/// Decides whether a request may reach its handler.
#[cfg_attr(test, mockall::automock)]
pub trait RequestAuthenticator: Send + Sync {
    /// Return `Ok(())` to let the request through, or the error to respond
    /// with instead.
    fn authenticate(&self, credentials: &RequestCredentials) -> Result<(), Error>;
}
