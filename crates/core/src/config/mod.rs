//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PEXWALL_*)
//! 2. TOML config file (if PEXWALL_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PEXWALL_*)
/// 2. TOML config file (if PEXWALL_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pexels API key used when a call does not carry its own.
    ///
    /// Set via PEXWALL_PEXELS_API_KEY environment variable.
    #[serde(default)]
    pub pexels_api_key: Option<String>,

    /// Pexels API base URL.
    ///
    /// Set via PEXWALL_PEXELS_BASE_URL environment variable.
    #[serde(default = "default_pexels_base_url")]
    pub pexels_base_url: String,

    /// Wallpaper site base URL.
    ///
    /// Set via PEXWALL_WALLPAPER_BASE_URL environment variable.
    #[serde(default = "default_wallpaper_base_url")]
    pub wallpaper_base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via PEXWALL_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via PEXWALL_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum spacing between outbound requests in milliseconds.
    ///
    /// Set via PEXWALL_MIN_REQUEST_INTERVAL_MS environment variable.
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// Entry count above which inserts sweep expired cache entries.
    #[serde(default = "default_cache_sweep_threshold")]
    pub cache_sweep_threshold: usize,

    /// TTL for popular video listings.
    #[serde(default = "default_popular_ttl_secs")]
    pub popular_ttl_secs: u64,

    /// TTL for search results.
    #[serde(default = "default_search_ttl_secs")]
    pub search_ttl_secs: u64,

    /// TTL for random video picks.
    #[serde(default = "default_random_ttl_secs")]
    pub random_ttl_secs: u64,

    /// TTL for single video lookups.
    #[serde(default = "default_detail_ttl_secs")]
    pub detail_ttl_secs: u64,

    /// TTL for scraped wallpaper listings.
    #[serde(default = "default_wallpaper_ttl_secs")]
    pub wallpaper_ttl_secs: u64,
}

fn default_pexels_base_url() -> String {
    "https://api.pexels.com".into()
}

fn default_wallpaper_base_url() -> String {
    "https://mbizhi.cheetahfun.com".into()
}

fn default_user_agent() -> String {
    "pexwall/0.1".into()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_min_request_interval_ms() -> u64 {
    1_000
}

fn default_cache_sweep_threshold() -> usize {
    100
}

fn default_popular_ttl_secs() -> u64 {
    3_600
}

fn default_search_ttl_secs() -> u64 {
    1_800
}

fn default_random_ttl_secs() -> u64 {
    1_200
}

fn default_detail_ttl_secs() -> u64 {
    300
}

fn default_wallpaper_ttl_secs() -> u64 {
    1_800
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pexels_api_key: None,
            pexels_base_url: default_pexels_base_url(),
            wallpaper_base_url: default_wallpaper_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            min_request_interval_ms: default_min_request_interval_ms(),
            cache_sweep_threshold: default_cache_sweep_threshold(),
            popular_ttl_secs: default_popular_ttl_secs(),
            search_ttl_secs: default_search_ttl_secs(),
            random_ttl_secs: default_random_ttl_secs(),
            detail_ttl_secs: default_detail_ttl_secs(),
            wallpaper_ttl_secs: default_wallpaper_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn popular_ttl(&self) -> Duration {
        Duration::from_secs(self.popular_ttl_secs)
    }

    pub fn search_ttl(&self) -> Duration {
        Duration::from_secs(self.search_ttl_secs)
    }

    pub fn random_ttl(&self) -> Duration {
        Duration::from_secs(self.random_ttl_secs)
    }

    pub fn detail_ttl(&self) -> Duration {
        Duration::from_secs(self.detail_ttl_secs)
    }

    pub fn wallpaper_ttl(&self) -> Duration {
        Duration::from_secs(self.wallpaper_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `PEXWALL_`
    /// 2. TOML file from `PEXWALL_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PEXWALL_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PEXWALL_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if a Pexels API key is configured (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set or blank.
    pub fn require_pexels_api_key(&self) -> Result<&str, ConfigError> {
        self.pexels_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "pexels_api_key".into(),
                hint: "Set PEXWALL_PEXELS_API_KEY or pass api_key with the call".into(),
            })
    }
}
