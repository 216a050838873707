//! wallpaper_category tool implementation.

use pexwall_client::listing_path;
use pexwall_core::Error;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::load_listing;
use crate::state::WidgetState;
use crate::tools::params::{lenient_string, non_blank};
use crate::tools::{MediaListOutput, json_result};

/// Input parameters for wallpaper_category tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WallpaperCategoryParams {
    /// Category id (109 4K, 2 landscape, 1 anime, 3 beauty, 6 animals,
    /// 8 games, 17 fresh, 9 other). Absent lists the homepage.
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
}

pub async fn wallpaper_category(state: &WidgetState, params: WallpaperCategoryParams) -> MediaListOutput {
    let result = async {
        let path = listing_path(non_blank(params.category.as_deref()))?;
        load_listing(state, &path).await
    }
    .await;

    match result {
        Ok((items, cache_hit)) => {
            tracing::info!(category = ?params.category, count = items.len(), cache_hit, "wallpaper_category");
            MediaListOutput::new(items, cache_hit)
        }
        Err(err) => {
            let err = Error::from(err);
            tracing::warn!(category = ?params.category, error = %err, "wallpaper category failed");
            MediaListOutput::error("Failed to load wallpapers", &err)
        }
    }
}

/// Implementation of the wallpaper_category tool.
pub async fn category_impl(state: &WidgetState, params: WallpaperCategoryParams) -> Result<CallToolResult, McpError> {
    let output = wallpaper_category(state, params).await;
    json_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::*;
    use pexwall_core::MediaKind;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(category: Option<&str>) -> WallpaperCategoryParams {
        WallpaperCategoryParams { category: category.map(str::to_string) }
    }

    #[tokio::test]
    async fn test_category_absent_is_homepage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dn/d/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&[1, 2, 3], "2")))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let output = wallpaper_category(&state, params(None)).await;
        assert_eq!(output.count, 3);
        assert_eq!(output.items[0].id, "wallpaper_1");
        assert_eq!(output.items[0].kind, MediaKind::Image);
        assert_eq!(output.items[0].category.as_deref(), Some("Landscape"));

        let cached = wallpaper_category(&state, params(Some("  "))).await;
        assert!(cached.cache_hit);
    }

    #[tokio::test]
    async fn test_category_known_and_4k_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dn/c6d/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&[60], "6")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dtag_109_a14fdede25965c8c0bd3ceb11f364baf/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&[109, 110], "109")))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        assert_eq!(wallpaper_category(&state, params(Some("6"))).await.count, 1);
        assert_eq!(wallpaper_category(&state, params(Some("109"))).await.count, 2);
    }

    #[tokio::test]
    async fn test_category_unknown_is_error_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let output = wallpaper_category(&state, params(Some("999"))).await;
        assert_eq!(output.count, 1);
        assert_eq!(output.items[0].kind, MediaKind::Error);
        assert!(output.items[0].description.contains("999"));
    }

    #[tokio::test]
    async fn test_category_fetch_failure_is_error_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let (state, _clock) = state_for(&server);
        let result = category_impl(&state, params(Some("2"))).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val.get("text").and_then(|v| v.as_str()).unwrap();
        let output: MediaListOutput = serde_json::from_str(text).unwrap();
        assert_eq!(output.items[0].kind, MediaKind::Error);
        assert_eq!(output.items[0].id, "error");
    }
}
