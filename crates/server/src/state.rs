//! Process-wide state shared by every tool call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use pexwall_client::{FetchClient, FetchConfig, PexelsClient, PexelsConfig, PexelsError, WallpaperClient};
use pexwall_core::{AppConfig, Clock, Error, ExpiringCache, MediaItem, SystemClock};

/// Config, HTTP pipeline, result cache and wallpaper client.
///
/// Built once at startup and handed to tools behind an `Arc`.
#[derive(Debug)]
pub struct WidgetState {
    pub config: AppConfig,
    pub fetch: FetchClient,
    pub cache: ExpiringCache<Vec<MediaItem>>,
    pub wallpapers: WallpaperClient,
}

impl WidgetState {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build state with an explicit cache clock.
    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        let fetch = FetchClient::new(FetchConfig::from(&config))?;
        let wallpapers = WallpaperClient::new(fetch.clone(), &config.wallpaper_base_url)?;
        let cache = ExpiringCache::with_clock(config.search_ttl(), config.cache_sweep_threshold, clock);

        Ok(Self { config, fetch, cache, wallpapers })
    }

    /// Build a Pexels client for a call, preferring the call's own key.
    pub fn pexels_client(&self, api_key: Option<&str>) -> Result<PexelsClient, Error> {
        let key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or_else(|| self.config.require_pexels_api_key().ok())
            .ok_or(PexelsError::MissingApiKey)?;

        let config = PexelsConfig::new(key).with_base_url(self.config.pexels_base_url.as_str());
        Ok(PexelsClient::new(self.fetch.clone(), config)?)
    }

    /// Serve `key` from the cache, or run `load` and cache a non-empty result.
    ///
    /// Returns the items and whether they came from the cache.
    pub async fn cached<F, Fut, E>(&self, key: &str, ttl: Duration, load: F) -> Result<(Vec<MediaItem>, bool), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<MediaItem>, E>>,
    {
        if let Some(items) = self.cache.get(key).await {
            tracing::debug!(key, "cache hit");
            return Ok((items, true));
        }

        tracing::debug!(key, "cache miss");
        let items = load().await?;
        if !items.is_empty() {
            self.cache.insert_with_ttl(key, items.clone(), ttl).await;
        }
        Ok((items, false))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use pexwall_core::MediaKind;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_pexels_client_prefers_call_key() {
        let server = MockServer::start().await;
        let (mut state, _clock) = state_for(&server);
        state.config.pexels_api_key = Some("configured-key-000000".into());

        assert!(state.pexels_client(Some(TEST_KEY)).is_ok());
        assert!(state.pexels_client(Some("  ")).is_ok(), "blank falls back to config");
        assert!(state.pexels_client(None).is_ok());
    }

    #[tokio::test]
    async fn test_pexels_client_key_errors() {
        let server = MockServer::start().await;
        let (mut state, _clock) = state_for(&server);

        assert!(matches!(state.pexels_client(None), Err(Error::InvalidInput(_))));
        assert!(matches!(state.pexels_client(Some("short")), Err(Error::InvalidInput(_))));

        state.config.pexels_api_key = Some("   ".into());
        assert!(matches!(state.pexels_client(None), Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_cached_serves_until_ttl() {
        let server = MockServer::start().await;
        let (state, clock) = state_for(&server);
        let item = MediaItem::new("x", MediaKind::Image, "X");

        let (items, hit) = state
            .cached("k", Duration::from_secs(60), || async { Ok::<_, Error>(vec![item.clone()]) })
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert!(!hit);

        let (_, hit) = state
            .cached("k", Duration::from_secs(60), || async { Ok::<_, Error>(Vec::new()) })
            .await
            .unwrap();
        assert!(hit);

        clock.advance(Duration::from_secs(60));
        let (items, hit) = state
            .cached("k", Duration::from_secs(60), || async { Ok::<_, Error>(Vec::new()) })
            .await
            .unwrap();
        assert!(items.is_empty());
        assert!(!hit);
    }

    #[tokio::test]
    async fn test_cached_skips_empty_and_errors() {
        let server = MockServer::start().await;
        let (state, _clock) = state_for(&server);

        let _ = state
            .cached("empty", Duration::from_secs(60), || async { Ok::<_, Error>(Vec::new()) })
            .await;
        let failed = state
            .cached("err", Duration::from_secs(60), || async { Err::<Vec<MediaItem>, _>(Error::Network("down".into())) })
            .await;

        assert!(failed.is_err());
        assert!(state.cache.is_empty().await);
    }
}
