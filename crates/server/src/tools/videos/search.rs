//! search_videos tool implementation.
//!
//! Performs video searches against the Pexels API with caching.

use std::time::Duration;

use pexwall_client::{Orientation, PexelsError, SearchRequest, SizeFilter, VideoQuality, transform_videos};
use pexwall_core::Error;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{describe_pexels_error, page_size, parse_duration};
use crate::state::WidgetState;
use crate::tools::params::{lenient_u32, non_blank};
use crate::tools::{MediaListOutput, json_result};

/// Keyword used when the host sends none.
pub const DEFAULT_QUERY: &str = "nature";

/// Input parameters for search_videos tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchVideosParams {
    /// Pexels API key. Falls back to the configured key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Search keyword (default "nature"). A blank keyword is rejected.
    #[serde(default)]
    pub query: Option<String>,

    /// Orientation: all (default), landscape, portrait or square.
    #[serde(default)]
    pub orientation: Option<String>,

    /// Minimum size: all (default), large, medium or small.
    #[serde(default)]
    pub size: Option<String>,

    /// Results per page (1-80, default 15).
    #[serde(default, deserialize_with = "lenient_u32")]
    pub per_page: Option<u32>,

    /// Page number (default 1).
    #[serde(default, deserialize_with = "lenient_u32")]
    pub page: Option<u32>,

    /// Duration filter: all, short, medium or long.
    #[serde(default)]
    pub duration: Option<String>,

    /// Rendition behind each item's videoUrl: hd (default), sd or original.
    #[serde(default)]
    pub quality: Option<String>,
}

/// Run a search, normalize the results and cache them.
pub async fn search_videos(state: &WidgetState, params: SearchVideosParams) -> Result<MediaListOutput, Error> {
    run_search(state, params, state.config.search_ttl()).await
}

/// Search with an explicit cache lifetime for the normalized page.
pub(crate) async fn run_search(
    state: &WidgetState, params: SearchVideosParams, ttl: Duration,
) -> Result<MediaListOutput, Error> {
    let client = state.pexels_client(params.api_key.as_deref())?;

    let query = params.query.as_deref().unwrap_or(DEFAULT_QUERY).trim();
    if query.is_empty() {
        return Err(Error::InvalidInput("please enter a search keyword".into()));
    }

    let filter = parse_duration(non_blank(params.duration.as_deref()))?;
    let orientation = Orientation::from_param(params.orientation.as_deref().unwrap_or_default())?;
    let size = SizeFilter::from_param(params.size.as_deref().unwrap_or_default())?;
    let quality = VideoQuality::from_param(params.quality.as_deref().unwrap_or_default())?;

    let req = SearchRequest {
        query: query.to_string(),
        per_page: page_size(params.per_page),
        page: params.page,
        orientation,
        size,
    };
    req.validate()?;

    let key = client.search_cache_key(&req, quality);
    let (items, cache_hit) = state
        .cached(&key, ttl, || async {
            let page = client.search(&req).await?;
            if page.dropped > 0 {
                tracing::debug!(dropped = page.dropped, "search page had malformed records");
            }
            Ok::<_, PexelsError>(transform_videos(&page.videos, quality))
        })
        .await
        .map_err(|e| describe_pexels_error("search_videos", e))?;

    let items = filter.apply(items);
    tracing::info!(query, count = items.len(), cache_hit, "search_videos");
    Ok(MediaListOutput::new(items, cache_hit))
}

/// Implementation of the search_videos tool.
pub async fn search_impl(state: &WidgetState, params: SearchVideosParams) -> Result<CallToolResult, McpError> {
    let output = search_videos(state, params).await?;
    json_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(query: &str) -> SearchVideosParams {
        SearchVideosParams { api_key: Some(TEST_KEY.into()), query: Some(query.into()), ..Default::default() }
    }

    #[tokio::test]
    async fn test_search_e2e() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .and(query_param("query", "ocean"))
            .and(query_param("per_page", "15"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![video_json(100, 8), video_json(200, 20)])))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let output = search_videos(&state, params(" ocean ")).await.unwrap();
        let ids: Vec<_> = output.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["pexels_100", "pexels_200"]);
        assert_eq!(output.items[0].author.as_deref(), Some("Tester"));
    }

    #[tokio::test]
    async fn test_search_default_query_and_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .and(query_param("query", "nature"))
            .and(query_param("orientation", "portrait"))
            .and(query_param("size", "large"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![video_json(1, 5)])))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let output = search_videos(
            &state,
            SearchVideosParams {
                api_key: Some(TEST_KEY.into()),
                orientation: Some("portrait".into()),
                size: Some("large".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(output.count, 1);
    }

    #[tokio::test]
    async fn test_search_all_filters_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![video_json(1, 5)])))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let output = search_videos(
            &state,
            SearchVideosParams { orientation: Some("all".into()), size: Some("all".into()), ..params("sky") },
        )
        .await
        .unwrap();
        assert_eq!(output.count, 1);

        let requests = server.received_requests().await.unwrap();
        let query = requests[0].url.query().unwrap_or_default().to_string();
        assert!(!query.contains("orientation"));
        assert!(!query.contains("size"));
    }

    #[tokio::test]
    async fn test_search_validation_fails_fast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        for bad in [
            params("   "),
            SearchVideosParams { per_page: Some(0), ..params("ocean") },
            SearchVideosParams { per_page: Some(81), ..params("ocean") },
            SearchVideosParams { page: Some(0), ..params("ocean") },
            SearchVideosParams { orientation: Some("sideways".into()), ..params("ocean") },
            SearchVideosParams { api_key: Some("short".into()), ..params("ocean") },
        ] {
            let err = search_videos(&state, bad).await.unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "got {err:?}");
        }
    }

    #[tokio::test]
    async fn test_search_empty_videos_is_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"videos": []})))
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let output = search_videos(&state, params("nothing here")).await.unwrap();
        assert_eq!(output.count, 0);
    }

    #[tokio::test]
    async fn test_search_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let err = search_videos(&state, params("ocean")).await.unwrap_err();
        assert!(matches!(err, Error::RateLimited(_)));
    }

    #[tokio::test]
    async fn test_search_cache_expires_after_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![video_json(1, 5)])))
            .expect(2)
            .mount(&server)
            .await;

        let (state, clock) = state_for(&server);
        assert!(!search_videos(&state, params("ocean")).await.unwrap().cache_hit);
        assert!(search_videos(&state, params("Ocean")).await.unwrap().cache_hit);

        clock.advance(Duration::from_secs(1800));
        assert!(!search_videos(&state, params("ocean")).await.unwrap().cache_hit);
    }

    #[tokio::test]
    async fn test_search_cache_is_scoped_to_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .and(header("Authorization", TEST_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![video_json(1, 5)])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"Unauthorized"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let output = search_videos(&state, params("ocean")).await.unwrap();
        assert_eq!(output.count, 1);

        let revoked = SearchVideosParams { api_key: Some("revoked-key-9999999999".into()), ..params("ocean") };
        let err = search_videos(&state, revoked).await.unwrap_err();
        assert!(matches!(err, Error::InvalidApiKey(_)), "got {err:?}");

        assert!(search_videos(&state, params("ocean")).await.unwrap().cache_hit);
    }

    #[tokio::test]
    async fn test_search_timeout_message_is_friendly() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(vec![video_json(1, 5)]))
                    .set_delay(Duration::from_secs(4)),
            )
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let err = search_videos(&state, params("ocean")).await.unwrap_err();
        assert!(matches!(err, Error::FetchTimeout(_)), "got {err:?}");

        let message = err.user_message();
        assert!(message.contains("network"), "{message}");
        assert!(!message.contains("127.0.0.1"), "{message}");
        assert!(!message.contains("2000"), "{message}");
    }

    #[tokio::test]
    async fn test_run_search_uses_given_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![video_json(1, 5)])))
            .mount(&server)
            .await;

        let (state, clock) = state_for(&server);
        run_search(&state, params("ocean"), Duration::from_secs(60)).await.unwrap();

        clock.advance(Duration::from_secs(59));
        assert_eq!(state.cache.purge_expired().await, 0);
        clock.advance(Duration::from_secs(2));
        assert_eq!(state.cache.purge_expired().await, 1);
    }
}
