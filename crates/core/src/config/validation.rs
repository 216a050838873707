//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("https://") || value.starts_with("http://")
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `min_request_interval_ms` exceeds 60 seconds
    /// - `user_agent` is empty
    /// - either base URL is not http(s)
    /// - any TTL or the sweep threshold is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.min_request_interval_ms > 60_000 {
            return Err(ConfigError::Invalid {
                field: "min_request_interval_ms".into(),
                reason: "must not exceed 60000ms".into(),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        for (field, value) in [("pexels_base_url", &self.pexels_base_url), ("wallpaper_base_url", &self.wallpaper_base_url)] {
            if !is_http_url(value) {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must be an http(s) URL".into() });
            }
        }

        for (field, value) in [
            ("popular_ttl_secs", self.popular_ttl_secs),
            ("search_ttl_secs", self.search_ttl_secs),
            ("random_ttl_secs", self.random_ttl_secs),
            ("detail_ttl_secs", self.detail_ttl_secs),
            ("wallpaper_ttl_secs", self.wallpaper_ttl_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must be greater than 0".into() });
            }
        }

        if self.cache_sweep_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_sweep_threshold".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.min_request_interval_ms == 0 {
            tracing::warn!("min_request_interval_ms is 0; outbound requests are not spaced");
        }

        Ok(())
    }
}
