//! Start-up configuration read from the process environment.
//!
//! Variables are read through [`mockable::Env`] so parsing is testable without
//! touching the real environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `MONGODB_URI` | required | document store connection string |
//! | `MONGODB_DATABASE` | `freelance-platform` | database holding the collections |
//! | `APP_BIND_ADDR` | `0.0.0.0:8080` | HTTP listen address |
//! | `AUTH_BEARER_TOKEN` | unset | shared token; enables the bearer gate |

use std::fmt;
use std::net::SocketAddr;

use mockable::Env;
use zeroize::Zeroizing;

pub const MONGODB_URI_ENV: &str = "MONGODB_URI";
pub const DATABASE_ENV: &str = "MONGODB_DATABASE";
pub const BIND_ADDR_ENV: &str = "APP_BIND_ADDR";
pub const AUTH_TOKEN_ENV: &str = "AUTH_BEARER_TOKEN";

pub const DEFAULT_DATABASE: &str = "freelance-platform";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

const SOCKET_ADDR_EXPECTED: &str = "host:port, e.g. 0.0.0.0:8080";

/// Errors raised while reading configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Validated server settings.
#[derive(Clone)]
pub struct ServerSettings {
    pub mongodb_uri: String,
    pub database: String,
    pub bind_addr: SocketAddr,
    pub auth_token: Option<Zeroizing<String>>,
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("mongodb_uri", &"<redacted>")
            .field("database", &self.database)
            .field("bind_addr", &self.bind_addr)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_blank<E: Env>(env: &E, name: &'static str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

/// Read [`ServerSettings`] from `env`.
///
/// # Examples
///
/// ```rust
/// use marketplace::settings::settings_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "MONGODB_URI" => Some("mongodb://localhost:27017".to_owned()),
///     _ => None,
/// });
///
/// let settings = settings_from_env(&env).expect("valid settings");
/// assert_eq!(settings.database, "freelance-platform");
/// assert_eq!(settings.bind_addr.port(), 8080);
/// assert!(settings.auth_token.is_none());
/// ```
pub fn settings_from_env<E: Env>(env: &E) -> Result<ServerSettings, SettingsError> {
    let mongodb_uri = non_blank(env, MONGODB_URI_ENV).ok_or(SettingsError::MissingEnv {
        name: MONGODB_URI_ENV,
    })?;
    let database = non_blank(env, DATABASE_ENV).unwrap_or_else(|| DEFAULT_DATABASE.to_owned());
    let bind_addr = bind_addr_from_env(env)?;
    let auth_token = non_blank(env, AUTH_TOKEN_ENV).map(Zeroizing::new);

    Ok(ServerSettings {
        mongodb_uri,
        database,
        bind_addr,
        auth_token,
    })
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, SettingsError> {
    let raw = non_blank(env, BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    let parsed = raw.trim().parse::<SocketAddr>();
    parsed.map_err(|_| SettingsError::InvalidEnv {
        name: BIND_ADDR_ENV,
        value: raw,
        expected: SOCKET_ADDR_EXPECTED,
    })
}
