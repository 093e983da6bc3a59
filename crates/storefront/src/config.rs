//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BOOKSTALL_HOST` - Bind address (default: 127.0.0.1)
//! - `BOOKSTALL_PORT` - Listen port (default: 8000)
//! - `BOOKSTALL_STATIC_DIR` - Static site root (default: crates/storefront/static)
//! - `BOOKSTALL_DATA_DIR` - Directory holding `users.txt` and `orders.txt`
//!   (default: crates/storefront/data)
//! - `BOOKSTALL_OPEN_BROWSER` - Open the home page in a browser on startup
//!   (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8000";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";
const DEFAULT_DATA_DIR: &str = "crates/storefront/data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory served as the site root
    pub static_dir: PathBuf,
    /// Directory holding the record files
    pub data_dir: PathBuf,
    /// Launch a browser at the home page once listening
    pub open_browser: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let host = or_default("BOOKSTALL_HOST", DEFAULT_HOST)
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BOOKSTALL_HOST".to_string(), e.to_string())
            })?;
        let port = or_default("BOOKSTALL_PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BOOKSTALL_PORT".to_string(), e.to_string())
            })?;
        let static_dir = PathBuf::from(or_default("BOOKSTALL_STATIC_DIR", DEFAULT_STATIC_DIR));
        let data_dir = PathBuf::from(or_default("BOOKSTALL_DATA_DIR", DEFAULT_DATA_DIR));
        let open_browser = match lookup("BOOKSTALL_OPEN_BROWSER") {
            Some(value) => parse_flag("BOOKSTALL_OPEN_BROWSER", &value)?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            static_dir,
            data_dir,
            open_browser,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// URL of the home page as announced on startup.
    #[must_use]
    pub fn home_url(&self) -> String {
        format!("http://localhost:{}/index.html", self.port)
    }

    /// URL of the book catalog as announced on startup.
    #[must_use]
    pub fn catalog_url(&self) -> String {
        format!("http://localhost:{}/book.html", self.port)
    }
}

/// Parse a boolean flag value.
fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
