use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client configuration for the Jikan-backed data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Fixed page size used for every list endpoint.
    pub items_per_page: u32,
    /// Jikan's official per-second request budget.
    pub requests_per_second: f64,
    /// Inactivity window after which the whole response cache is dropped.
    pub cache_ttl_seconds: u64,
    /// Serialized-JSON size above which a payload is never cached.
    pub max_cacheable_chars: usize,
    /// Number of gallery images requested per character.
    pub picture_limit: u32,
    /// Score floor applied by the primary search query.
    pub min_search_score: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jikan.moe/v4".to_string(),
            timeout_seconds: 30,
            user_agent: "Sagasu-Anime-App/1.0".to_string(),
            items_per_page: 8,
            requests_per_second: 3.0,
            cache_ttl_seconds: 5 * 60,
            max_cacheable_chars: 100_000,
            picture_limit: 5,
            min_search_score: 5,
        }
    }
}

impl ClientConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// Recognized variables: `SAGASU_BASE_URL`, `SAGASU_TIMEOUT_SECONDS`,
    /// `SAGASU_ITEMS_PER_PAGE`, `SAGASU_CACHE_TTL_SECONDS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("SAGASU_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(timeout) = env_parse("SAGASU_TIMEOUT_SECONDS") {
            config.timeout_seconds = timeout;
        }
        if let Some(per_page) = env_parse("SAGASU_ITEMS_PER_PAGE") {
            config.items_per_page = per_page;
        }
        if let Some(ttl) = env_parse("SAGASU_CACHE_TTL_SECONDS") {
            config.cache_ttl_seconds = ttl;
        }
        config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_jikan_contract() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.jikan.moe/v4");
        assert_eq!(config.items_per_page, 8);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.max_cacheable_chars, 100_000);
        assert_eq!(config.picture_limit, 5);
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("SAGASU_BASE_URL", "http://localhost:8080/v4");
        std::env::set_var("SAGASU_ITEMS_PER_PAGE", "12");
        std::env::set_var("SAGASU_CACHE_TTL_SECONDS", "not-a-number");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://localhost:8080/v4");
        assert_eq!(config.items_per_page, 12);
        // Unparseable values fall back to the default
        assert_eq!(config.cache_ttl_seconds, 300);

        std::env::remove_var("SAGASU_BASE_URL");
        std::env::remove_var("SAGASU_ITEMS_PER_PAGE");
        std::env::remove_var("SAGASU_CACHE_TTL_SECONDS");
    }
}
