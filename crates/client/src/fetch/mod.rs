//! HTTP fetch pipeline behind a shared request gate.
//!
//! ### Request Gate
//! - Every request waits on one [`RateLimiter`] shared by all clones of the client
//! - Default spacing: 1s between request starts
//!
//! ### Responses
//! - Explicit per-request timeout (default: 15s)
//! - Non-2xx responses fail with [`Error::HttpError`] carrying a truncated body
//! - No automatic retry
//!
//! ### URL Handling
//! - Canonicalize configured base URLs
//! - Resolve scraped media references against a page base

pub mod rate_limit;
pub mod url;

use bytes::Bytes;
use reqwest::{Client, RequestBuilder, StatusCode, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use rate_limit::RateLimiter;
pub use url::{UrlError, canonicalize, resolve_media_url};

use pexwall_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "pexwall/0.1")
    pub user_agent: String,

    /// Request timeout (default: 15s)
    pub timeout: Duration,

    /// Minimum spacing between request starts (default: 1s)
    pub min_request_interval: Duration,

    /// Bytes of an error response body kept for diagnostics (default: 512)
    pub max_error_body: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "pexwall/0.1".to_string(),
            timeout: Duration::from_millis(15_000),
            min_request_interval: Duration::from_millis(1_000),
            max_error_body: 512,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            min_request_interval: config.min_request_interval(),
            ..Default::default()
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The final URL after redirects
    pub url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds, excluding gate wait
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Body decoded as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.bytes).map_err(|e| Error::ParseFailed(format!("invalid JSON from {}: {e}", self.url)))
    }
}

/// HTTP fetch client. Clones share the connection pool and the request gate.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
    gate: Arc<RateLimiter>,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;

        let gate = Arc::new(RateLimiter::new(config.min_request_interval));

        Ok(Self { http, config, gate })
    }

    /// Fetch a URL with extra request headers.
    pub async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<FetchResponse, Error> {
        let url = parse_url(url)?;
        let request = self.http.get(url.clone());
        self.execute(url, request, headers).await
    }

    /// Fetch a URL with query parameters and extra request headers.
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self, url: &str, query: &Q, headers: &[(&str, &str)],
    ) -> Result<FetchResponse, Error> {
        let url = parse_url(url)?;
        let request = self.http.get(url.clone()).query(query);
        self.execute(url, request, headers).await
    }

    async fn execute(
        &self, url: Url, mut request: RequestBuilder, headers: &[(&str, &str)],
    ) -> Result<FetchResponse, Error> {
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        self.gate.acquire().await;
        let start = Instant::now();

        tracing::debug!(%url, "sending request");

        let response = request.send().await.map_err(|e| self.transport_error(&url, &e))?;

        let status = response.status();
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response.bytes().await.map_err(|e| self.transport_error(&url, &e))?;
        let fetch_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let body = truncate_body(&String::from_utf8_lossy(&bytes), self.config.max_error_body);
            tracing::debug!(%url, status = status.as_u16(), fetch_ms, "request failed");
            return Err(Error::HttpError { status: status.as_u16(), body });
        }

        tracing::debug!("fetched {} in {}ms ({} bytes)", final_url, fetch_ms, bytes.len());

        Ok(FetchResponse { url: final_url, status, content_type, bytes, fetch_ms })
    }

    fn transport_error(&self, url: &Url, err: &reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::FetchTimeout(format!(
                "request to {url} timed out after {}ms",
                self.config.timeout.as_millis()
            ))
        } else {
            Error::Network(format!("network error: {err}"))
        }
    }

    /// Get reference to the shared request gate.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.gate
    }
}

fn parse_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::InvalidUrl(format!("unsupported scheme: {scheme}"))),
    }
}

fn truncate_body(body: &str, max: usize) -> String {
    let body = body.trim();
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}
