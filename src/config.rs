//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development.

use crate::services::RetryPolicy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which service implementation backs the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    /// Local deterministic answers
    Demo,
    /// Real backend over HTTP
    Http,
}

impl FromStr for ServiceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(ServiceMode::Demo),
            "http" => Ok(ServiceMode::Http),
            _ => Err(ConfigError::Invalid {
                var: "SERVICE_MODE",
                value: s.to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Base URL the HTTP services call (endpoint paths are appended)
    pub api_base_url: String,
    pub service_mode: ServiceMode,
    /// Whether demo answers wait their artificial latency
    pub demo_latency: bool,
    /// Attempts per API request
    pub api_retries: u32,
    /// Per-attempt timeout
    pub api_timeout: Duration,
    /// Linear backoff step between attempts
    pub api_backoff: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            api_base_url: "http://localhost:8080/api".to_string(),
            service_mode: ServiceMode::Demo,
            demo_latency: false,
            api_retries: 3,
            api_timeout: Duration::from_millis(10_000),
            api_backoff: Duration::from_millis(1000),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            api_base_url: env::var("API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            service_mode: parse_var("SERVICE_MODE", ServiceMode::Demo)?,
            demo_latency: parse_var("DEMO_LATENCY", true)?,
            api_retries: parse_var("API_RETRIES", 3)?,
            api_timeout: Duration::from_millis(parse_var("API_TIMEOUT_MS", 10_000)?),
            api_backoff: Duration::from_millis(parse_var("API_BACKOFF_MS", 1000)?),
        })
    }

    /// Retry settings for the API client.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.api_retries,
            timeout: self.api_timeout,
            backoff_step: self.api_backoff,
        }
    }
}

/// Parse an optional variable, keeping `default` when unset.
fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set vars for test
        env::set_var("SERVICE_MODE", "HTTP");
        env::set_var("API_BASE_URL", "http://127.0.0.1:9000/api/");
        env::set_var("API_RETRIES", "5");
        env::set_var("DEMO_LATENCY", "false");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.service_mode, ServiceMode::Http);
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.retry_policy().retries, 5);
        assert!(!config.demo_latency);
        assert_eq!(config.api_timeout, Duration::from_secs(10));

        env::set_var("API_RETRIES", "many");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "API_RETRIES", .. }));
        env::remove_var("API_RETRIES");

        env::set_var("PORT", "eighty");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
        env::set_var("PORT", "9090");
        assert_eq!(Config::from_env().unwrap().port, 9090);
        env::remove_var("PORT");

        for var in ["SERVICE_MODE", "API_BASE_URL", "API_RETRIES", "DEMO_LATENCY"] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_unknown_service_mode() {
        assert!("grpc".parse::<ServiceMode>().is_err());
        assert_eq!("demo".parse::<ServiceMode>().unwrap(), ServiceMode::Demo);
    }
}
