//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PROFILE_API_URL` - Base URL of the artisan profile API
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `PROFILE_CACHE_TTL_SECS` - How long profile responses are cached (default: 300)
//! - `IMAGE_CACHE_MAX_ENTRIES` - Bound on cached images (default: unbounded)
//! - `STOREFRONT_DEMO_CATALOG` - Append the demo artisans to the catalog (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use artisan_market_core::image_cache::EvictionPolicy;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
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
    /// Remote profile API configuration
    pub profile_api: ProfileApiConfig,
    /// Eviction policy for the image cache
    pub image_cache: EvictionPolicy,
    /// Whether demo artisans are appended to the remote catalog
    pub demo_catalog: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Remote profile API configuration.
#[derive(Debug, Clone)]
pub struct ProfileApiConfig {
    /// Base URL; endpoint paths are appended to it
    pub base_url: Url,
    /// TTL for cached list and detail responses
    pub cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("STOREFRONT_PORT", "3000")?;

        let profile_api = ProfileApiConfig::from_env()?;
        let image_cache = get_optional_env("IMAGE_CACHE_MAX_ENTRIES")
            .map(|raw| parse_value::<u64>("IMAGE_CACHE_MAX_ENTRIES", &raw))
            .transpose()?
            .map_or(EvictionPolicy::Unbounded, EvictionPolicy::MaxEntries);
        let demo_catalog = parse_bool("STOREFRONT_DEMO_CATALOG", true)?;

        Ok(Self {
            host,
            port,
            profile_api,
            image_cache,
            demo_catalog,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ProfileApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_required_env("PROFILE_API_URL")?;
        let base_url = parse_base_url(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("PROFILE_API_URL".to_string(), e))?;
        let ttl_secs: u64 = parse_env_or_default("PROFILE_CACHE_TTL_SECS", "300")?;

        Ok(Self {
            base_url,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

/// Parse an API base URL, ensuring a trailing slash so `Url::join` appends.
///
/// # Errors
///
/// Returns a message if the URL is malformed or not http(s).
pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a boolean flag accepting true/false, 1/0, yes/no.
fn parse_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |raw| parse_flag(key, &raw))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            profile_api: ProfileApiConfig {
                base_url: parse_base_url("http://localhost:8000").unwrap(),
                cache_ttl: Duration::from_secs(300),
            },
            image_cache: EvictionPolicy::Unbounded,
            demo_catalog: true,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("https://api.example.org/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.org/v1/");
        assert_eq!(
            url.join("db/all").unwrap().as_str(),
            "https://api.example.org/v1/db/all"
        );

        let root = parse_base_url("http://localhost:8000").unwrap();
        assert_eq!(root.join("db/all").unwrap().as_str(), "http://localhost:8000/db/all");
    }

    #[test]
    fn test_parse_base_url_rejects_bad_input() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("ftp://files.example.org").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("X", "TRUE").unwrap());
        assert!(parse_flag("X", " yes ").unwrap());
        assert!(!parse_flag("X", "0").unwrap());
        assert!(matches!(
            parse_flag("X", "maybe"),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "X"
        ));
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("STOREFRONT_PORT", "70000").unwrap_err();
        assert!(err.to_string().starts_with("Invalid environment variable STOREFRONT_PORT"));
    }
}
