//! Service configuration loaded from the process environment.
//!
//! Database settings are supplied as discrete variables and rendered into a
//! libpq key/value connection string.

use std::env::{self, VarError};
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

const DEFAULT_DATABASE_PORT: u16 = 5432;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

const VARIABLES: [&str; 8] = [
    "DATABASE_HOST",
    "DATABASE_PORT",
    "DATABASE_USER",
    "DATABASE_PASSWORD",
    "DATABASE_NAME",
    "DATABASE_POOL_SIZE",
    "SERVER_HOST",
    "SERVER_PORT",
];

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    /// A variable is set but is not valid UTF-8.
    #[error("{0} environment variable is not valid UTF-8")]
    NotUnicode(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// What was expected.
        reason: &'static str,
    },
}

/// Connection settings for the task datastore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Role to connect as.
    pub user: String,
    /// Role password, possibly empty.
    pub password: String,
    /// Database name.
    pub name: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

impl DatabaseConfig {
    /// Renders the settings as a libpq key/value connection string.
    ///
    /// Every value is quoted so passwords containing spaces, quotes or
    /// backslashes survive intact.
    #[must_use]
    pub fn connection_string(&self) -> String {
        let port = self.port.to_string();
        [
            ("host", self.host.as_str()),
            ("port", port.as_str()),
            ("user", self.user.as_str()),
            ("password", self.password.as_str()),
            ("dbname", self.name.as_str()),
        ]
        .iter()
        .map(|(key, value)| format!("{key}={}", libpq_quote(value)))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Datastore connection settings.
    pub database: DatabaseConfig,
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
}

impl ServiceConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_HOST`, `DATABASE_USER`, `DATABASE_NAME`: required
    /// - `DATABASE_PORT`: defaults to `5432`
    /// - `DATABASE_PASSWORD`: defaults to empty
    /// - `DATABASE_POOL_SIZE`: defaults to `10`, must be positive
    /// - `SERVER_HOST`: defaults to `0.0.0.0`
    /// - `SERVER_PORT`: required
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        for name in VARIABLES {
            if matches!(env::var(name), Err(VarError::NotUnicode(_))) {
                return Err(ConfigError::NotUnicode(name));
            }
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] under the same conditions as
    /// [`ServiceConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &'static str| read(name).ok_or(ConfigError::Missing(name));

        let pool_size = parse_or(read("DATABASE_POOL_SIZE"), "DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_POOL_SIZE",
                value: pool_size.to_string(),
                reason: "expected a positive integer",
            });
        }

        let database = DatabaseConfig {
            host: required("DATABASE_HOST")?,
            port: parse_or(read("DATABASE_PORT"), "DATABASE_PORT", DEFAULT_DATABASE_PORT)?,
            user: required("DATABASE_USER")?,
            password: lookup("DATABASE_PASSWORD").unwrap_or_default(),
            name: required("DATABASE_NAME")?,
            pool_size,
        };

        let server_host = read("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_owned());
        let host: IpAddr = server_host.parse().map_err(|_| ConfigError::Invalid {
            name: "SERVER_HOST",
            value: server_host.clone(),
            reason: "expected an IP address",
        })?;
        let server_port = required("SERVER_PORT")?;
        let port = parse_value(&server_port, "SERVER_PORT")?;

        Ok(Self {
            database,
            listen_addr: SocketAddr::new(host, port),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    raw.map_or(Ok(default), |value| parse_value(&value, name))
}

fn parse_value<T: std::str::FromStr>(raw: &str, name: &'static str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_owned(),
        reason: "expected a non-negative integer",
    })
}

/// Quotes a value for a libpq key/value connection string.
///
/// Uses single-quote wrapping with backslash escapes for embedded quotes and
/// backslashes.
#[must_use]
pub fn libpq_quote(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('\'');
    escaped
}
