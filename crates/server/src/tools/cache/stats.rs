//! cache_stats tool implementation.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WidgetState;
use crate::tools::json_result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsOutput {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Outbound requests admitted by the rate limiter.
    pub request_count: u64,
}

pub async fn cache_stats(state: &WidgetState) -> CacheStatsOutput {
    let stats = state.cache.stats().await;
    CacheStatsOutput {
        entries: stats.entries,
        hits: stats.hits,
        misses: stats.misses,
        request_count: state.fetch.rate_limiter().request_count(),
    }
}

/// Implementation of the cache_stats tool.
pub async fn stats_impl(state: &WidgetState) -> Result<CallToolResult, McpError> {
    let output = cache_stats(state).await;
    json_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::*;
    use crate::tools::videos::popular::{PopularVideosParams, popular_videos};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_stats_track_hits_misses_and_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![video_json(1, 5)])))
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        assert_eq!(cache_stats(&state).await, CacheStatsOutput { entries: 0, hits: 0, misses: 0, request_count: 0 });

        let params = PopularVideosParams { api_key: Some(TEST_KEY.into()), ..Default::default() };
        popular_videos(&state, params.clone()).await.unwrap();
        popular_videos(&state, params).await.unwrap();

        let stats = cache_stats(&state).await;
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.request_count, 1);
    }

    #[tokio::test]
    async fn test_stats_impl_uses_camel_case() {
        let server = MockServer::start().await;
        let (state, _clock) = state_for(&server);
        let result = stats_impl(&state).await.unwrap();
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val.get("text").and_then(|v| v.as_str()).unwrap();
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value["requestCount"], 0);
    }
}
