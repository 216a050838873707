//! Pexels video API client.
//!
//! Provides a client for the Pexels video endpoints with request validation,
//! lenient response decoding and normalization into media items.
//!
//! ### API
//!
//! - **Endpoints**: `/videos/popular`, `/videos/search`, `/videos/videos/{id}`
//! - **Authentication**: raw API key in the `Authorization` header.
//! - **Rate Limiting**: shared request gate owned by [`FetchClient`]; no retries.
//! - **Normalization**: records become [`pexwall_core::MediaItem`]s via [`transform`].

pub mod error;
pub mod request;
pub mod response;
pub mod transform;

pub use error::PexelsError;
pub use request::{Orientation, PopularRequest, SearchRequest, SizeFilter, VideoQuality};
pub use response::{Tags, VideoFile, VideoPage, VideoPicture, VideoRecord, VideoUser, decode_page};
pub use transform::{TransformError, to_media_item, transform_videos};

use pexwall_core::cache::compute_cache_key;

use crate::fetch::{FetchClient, canonicalize};

/// Default base URL for the Pexels API.
pub const DEFAULT_BASE_URL: &str = "https://api.pexels.com";

/// Keys at or below this trimmed length are rejected before any request.
pub const MIN_API_KEY_LEN: usize = 10;

/// Check an API key's shape, returning the trimmed key.
pub fn validate_api_key(raw: &str) -> Result<&str, PexelsError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(PexelsError::MissingApiKey);
    }
    if key.chars().count() <= MIN_API_KEY_LEN {
        return Err(PexelsError::InvalidApiKey);
    }
    Ok(key)
}

/// Pexels client configuration.
#[derive(Debug, Clone)]
pub struct PexelsConfig {
    pub api_key: String,
    /// Base URL (default: https://api.pexels.com).
    pub base_url: String,
}

impl PexelsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: DEFAULT_BASE_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Pexels video API client.
#[derive(Debug, Clone)]
pub struct PexelsClient {
    fetch: FetchClient,
    api_key: String,
    base_url: String,
}

impl PexelsClient {
    /// Create a client over a shared fetch pipeline.
    pub fn new(fetch: FetchClient, config: PexelsConfig) -> Result<Self, PexelsError> {
        let api_key = validate_api_key(&config.api_key)?.to_string();
        let base = canonicalize(&config.base_url).map_err(|e| PexelsError::InvalidUrl(e.to_string()))?;
        let base_url = base.as_str().trim_end_matches('/').to_string();

        Ok(Self { fetch, api_key, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self) -> [(&str, &str); 2] {
        [("Authorization", self.api_key.as_str()), ("Accept", "application/json")]
    }

    /// Fetch the curated popular listing.
    pub async fn popular(&self, req: &PopularRequest) -> Result<VideoPage, PexelsError> {
        req.validate()?;

        let query = PopularRequest { per_page: Some(req.get_per_page()), page: Some(req.get_page()), min_width: req.min_width };
        tracing::debug!(per_page = req.get_per_page(), page = req.get_page(), "fetching popular videos");

        let response = self
            .fetch
            .get_with_query(&self.endpoint("/videos/popular"), &query, &self.headers())
            .await?;

        Ok(decode_page(&response.bytes))
    }

    /// Execute a video search.
    pub async fn search(&self, req: &SearchRequest) -> Result<VideoPage, PexelsError> {
        req.validate()?;

        let query = SearchRequest {
            query: req.query.trim().to_string(),
            per_page: Some(req.get_per_page()),
            page: Some(req.get_page()),
            orientation: req.orientation,
            size: req.size,
        };
        tracing::debug!("searching Pexels videos: query={}", query.query);

        let response = self
            .fetch
            .get_with_query(&self.endpoint("/videos/search"), &query, &self.headers())
            .await?;

        Ok(decode_page(&response.bytes))
    }

    /// Fetch one video by numeric id.
    pub async fn video(&self, id: u64) -> Result<VideoRecord, PexelsError> {
        let url = self.endpoint(&format!("/videos/videos/{id}"));
        let response = self.fetch.get(&url, &self.headers()).await?;
        Ok(response.json::<VideoRecord>()?)
    }

    /// Check the key against the API with a one-item popular request.
    pub async fn verify(&self) -> Result<(), PexelsError> {
        let query = [("per_page", "1")];
        self.fetch
            .get_with_query(&self.endpoint("/videos/popular"), &query, &self.headers())
            .await?;
        Ok(())
    }

    /// Digest of the API key. The raw key never enters a cache key.
    fn key_scope(&self) -> String {
        compute_cache_key("pexels:key", &serde_json::json!(self.api_key))
    }

    /// Cache key for a popular listing rendered at `quality`.
    pub fn popular_cache_key(&self, req: &PopularRequest, quality: VideoQuality) -> String {
        let params = serde_json::json!({
            "key": self.key_scope(),
            "per_page": req.get_per_page(),
            "page": req.get_page(),
            "min_width": req.min_width.unwrap_or(0),
            "quality": quality,
        });
        compute_cache_key("pexels:popular", &params)
    }

    /// Cache key for a search. The query is trimmed and lowercased.
    pub fn search_cache_key(&self, req: &SearchRequest, quality: VideoQuality) -> String {
        let params = serde_json::json!({
            "key": self.key_scope(),
            "query": req.query.trim().to_lowercase(),
            "per_page": req.get_per_page(),
            "page": req.get_page(),
            "orientation": req.orientation,
            "size": req.size,
            "quality": quality,
        });
        compute_cache_key("pexels:search", &params)
    }

    pub fn video_cache_key(&self, id: u64) -> String {
        compute_cache_key("pexels:video", &serde_json::json!({"key": self.key_scope(), "id": id}))
    }
}
