//! Authentication gate policies.
//!
//! [`AllowAllAuthenticator`] is the default placeholder and lets every request
//! through. [`BearerTokenAuthenticator`] demands a single shared token and is
//! enabled when one is configured.

use zeroize::Zeroizing;

use crate::domain::Error;
use crate::domain::ports::{RequestAuthenticator, RequestCredentials};

/// Placeholder gate that performs no check.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAllAuthenticator;

impl RequestAuthenticator for AllowAllAuthenticator {
    fn authenticate(&self, _credentials: &RequestCredentials) -> Result<(), Error> {
        Ok(())
    }
}

/// Gate accepting only requests that present the configured bearer token.
///
/// # Examples
/// ```
/// use marketplace::domain::BearerTokenAuthenticator;
/// use marketplace::domain::ports::{RequestAuthenticator, RequestCredentials};
///
/// let gate = BearerTokenAuthenticator::new("s3cret");
/// assert!(gate.authenticate(&RequestCredentials::bearer("s3cret")).is_ok());
/// assert!(gate.authenticate(&RequestCredentials::anonymous()).is_err());
/// ```
pub struct BearerTokenAuthenticator {
    token: Zeroizing<String>,
}

impl BearerTokenAuthenticator {
    /// Require `token` on every gated request.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
        }
    }
}

impl RequestAuthenticator for BearerTokenAuthenticator {
    fn authenticate(&self, credentials: &RequestCredentials) -> Result<(), Error> {
        match credentials.bearer_token() {
            None => Err(Error::unauthorized("missing bearer token")),
            Some(presented) if presented == self.token.as_str() => Ok(()),
            Some(_) => Err(Error::unauthorized("invalid bearer token")),
        }
    }
}
