//! Server configuration from environment variables.
//!
//! # Responsibility
//! - Read bind address, store location and logging settings.
//! - Honor a `.env` file in the working directory.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Malformed values are startup errors, never silently replaced.

use album_core::{default_log_level, DbError, StoreLocation, DEFAULT_DATABASE_URL};
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::num::ParseIntError;
use thiserror::Error;

const HOST_ENV: &str = "ALBUMS_HOST";
const HOST_DEFAULT: &str = "localhost";

const PORT_ENV: &str = "ALBUMS_PORT";
const PORT_DEFAULT: u16 = 8080;

const DATABASE_URL_ENV: &str = "DATABASE_URL";

const LOG_LEVEL_ENV: &str = "ALBUMS_LOG_LEVEL";
const LOG_DIR_ENV: &str = "ALBUMS_LOG_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid ALBUMS_PORT `{value}`: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },

    #[error("invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(#[source] DbError),

    #[error("failed to resolve `{host}:{port}`: {source}")]
    Resolve {
        host: String,
        port: u16,
        source: io::Error,
    },

    #[error("`{host}:{port}` did not resolve to any address")]
    NoAddress { host: String, port: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreLocation,
    pub log_level: String,
    /// Absolute directory for rotating log files; stderr only when unset.
    pub log_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: HOST_DEFAULT.to_string(),
            port: PORT_DEFAULT,
            store: StoreLocation::default(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

/// Loads variables from a `.env` file if one exists.
///
/// Returns the file path for reporting; logging is not up yet.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    dotenvy::dotenv().ok()
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = var(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = var(PORT_ENV) {
            config.port = port
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value: port, source })?;
        }
        let database_url = var(DATABASE_URL_ENV).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        config.store = StoreLocation::parse(&database_url).map_err(ConfigError::InvalidDatabaseUrl)?;
        if let Some(level) = var(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config.log_dir = var(LOG_DIR_ENV);

        Ok(config)
    }

    /// Resolves `host:port` to the first socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| ConfigError::Resolve {
                host: self.host.clone(),
                port: self.port,
                source,
            })?
            .next()
            .ok_or_else(|| ConfigError::NoAddress {
                host: self.host.clone(),
                port: self.port,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig};
    use album_core::StoreLocation;
    use std::collections::HashMap;
    use std::path::Path;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert_eq!(config.store.path(), Path::new("albums.sqlite3"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("ALBUMS_HOST", "127.0.0.1"),
            ("ALBUMS_PORT", " 9090 "),
            ("DATABASE_URL", "sqlite:///tmp/test-albums.db"),
            ("ALBUMS_LOG_LEVEL", "warn"),
            ("ALBUMS_LOG_DIR", "/var/log/albums"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.store, StoreLocation::from_path("/tmp/test-albums.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/albums"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("ALBUMS_PORT", "  "), ("DATABASE_URL", "")]))
                .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreLocation::default());
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("ALBUMS_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "eighty"));

        let err = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite://")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDatabaseUrl(_)));
    }

    #[test]
    fn socket_addr_resolves_ip_literals() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8081,
            ..ServerConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8081");
    }
}
