//! Server configuration management

use crate::error::{ApiError, Result};
use maplink::NominatimConfig;
use maplink::nominatim::{DEFAULT_NOMINATIM_URL, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// CORS allowed origins, `*` allows any origin and an empty list disables CORS
    pub cors_origins: Vec<String>,

    /// Message shown on the landing page
    pub landing_message: String,

    /// Nominatim base URL
    pub nominatim_url: String,

    /// User agent for outbound requests
    pub user_agent: String,

    /// Minimum milliseconds between two Nominatim requests
    pub nominatim_min_interval_ms: u64,

    /// Preferred language for Nominatim results
    pub nominatim_accept_language: Option<String>,

    /// Timeout for outbound requests in seconds
    pub request_timeout_seconds: u64,

    /// Maximum number of redirects followed when unshortening
    pub max_redirects: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or(defaults.cors_origins),
            landing_message: std::env::var("LANDING_MESSAGE").unwrap_or(defaults.landing_message),
            nominatim_url: std::env::var("NOMINATIM_URL").unwrap_or(defaults.nominatim_url),
            user_agent: std::env::var("NOMINATIM_USER_AGENT").unwrap_or(defaults.user_agent),
            nominatim_min_interval_ms: parse_var(
                "NOMINATIM_MIN_INTERVAL_MS",
                defaults.nominatim_min_interval_ms,
            )?,
            nominatim_accept_language: std::env::var("NOMINATIM_ACCEPT_LANGUAGE")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            request_timeout_seconds: parse_var(
                "REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            )?,
            max_redirects: parse_var("MAX_REDIRECTS", defaults.max_redirects)?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn nominatim(&self) -> NominatimConfig {
        NominatimConfig {
            base_url: self.nominatim_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.request_timeout(),
            min_request_interval: Duration::from_millis(self.nominatim_min_interval_ms),
            accept_language: self.nominatim_accept_language.clone(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ApiError::Config(format!("Invalid {} value", name))),
        Err(_) => Ok(default),
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec!["*".to_string()],
            landing_message: "Map link resolver is running".to_string(),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            nominatim_min_interval_ms: 1000,
            nominatim_accept_language: None,
            request_timeout_seconds: 30,
            max_redirects: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example ,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_var_rejects_non_numeric_values() {
        // SAFETY: the variable names are unique to this test
        unsafe {
            std::env::set_var("MAPLINK_TEST_INVALID_PORT", "eighty");
            std::env::set_var("MAPLINK_TEST_INVALID_REDIRECTS", "-3");
        }

        let port = parse_var::<u16>("MAPLINK_TEST_INVALID_PORT", 5000);
        assert!(matches!(port, Err(ApiError::Config(ref msg)) if msg.contains("MAPLINK_TEST_INVALID_PORT")));

        let redirects = parse_var::<usize>("MAPLINK_TEST_INVALID_REDIRECTS", 10);
        assert!(matches!(redirects, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_parse_var_defaults_and_trims() {
        // SAFETY: the variable names are unique to this test
        unsafe {
            std::env::set_var("MAPLINK_TEST_PADDED_PORT", " 8080 ");
            std::env::remove_var("MAPLINK_TEST_UNSET_PORT");
        }

        assert_eq!(parse_var::<u16>("MAPLINK_TEST_PADDED_PORT", 5000).unwrap(), 8080);
        assert_eq!(parse_var::<u16>("MAPLINK_TEST_UNSET_PORT", 5000).unwrap(), 5000);
    }

    #[test]
    fn test_nominatim_config_from_server_config() {
        let config = ServerConfig {
            nominatim_min_interval_ms: 250,
            request_timeout_seconds: 7,
            ..ServerConfig::default()
        };
        let nominatim = config.nominatim();

        assert_eq!(nominatim.base_url, DEFAULT_NOMINATIM_URL);
        assert_eq!(nominatim.min_request_interval, Duration::from_millis(250));
        assert_eq!(nominatim.timeout, Duration::from_secs(7));
    }
}
