//! Configuration Module
//!
//! Loads client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds a cached response stays valid (also the sweep period)
    pub cache_ttl: u64,
    /// PokeAPI base URL, without a trailing slash
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub http_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_TTL_SECS` - Cache TTL in seconds (default: 5)
    /// - `POKEAPI_BASE_URL` - API base URL (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: env::var("POKEDEX_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.cache_ttl),
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            http_timeout: env::var("POKEDEX_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 5,
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 5);
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.http_timeout, 10);
        assert_eq!(config.cache_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env to avoid races between test threads
        env::remove_var("POKEDEX_CACHE_TTL_SECS");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("POKEDEX_HTTP_TIMEOUT_SECS");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 5);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.http_timeout, 10);

        env::set_var("POKEDEX_CACHE_TTL_SECS", "0");
        env::set_var("POKEAPI_BASE_URL", "http://localhost:8080/api/v2/");
        env::set_var("POKEDEX_HTTP_TIMEOUT_SECS", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 5, "Zero TTL falls back to default");
        assert_eq!(config.base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.http_timeout, 10);

        env::remove_var("POKEDEX_CACHE_TTL_SECS");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("POKEDEX_HTTP_TIMEOUT_SECS");
    }
}
