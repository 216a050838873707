//! popular_videos tool implementation.
//!
//! Lists curated popular videos with caching.

use pexwall_client::{PexelsError, PopularRequest, VideoQuality, transform_videos};
use pexwall_core::Error;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{describe_pexels_error, page_size, parse_duration};
use crate::state::WidgetState;
use crate::tools::params::{lenient_u32, non_blank};
use crate::tools::{MediaListOutput, json_result};

/// Input parameters for popular_videos tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PopularVideosParams {
    /// Pexels API key. Falls back to the configured key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Results per page (1-80, default 15).
    #[serde(default, deserialize_with = "lenient_u32")]
    pub per_page: Option<u32>,

    /// Page number (default 1).
    #[serde(default, deserialize_with = "lenient_u32")]
    pub page: Option<u32>,

    /// Minimum width in pixels; 0 means no minimum.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub min_width: Option<u32>,

    /// Duration filter: all, short, medium or long.
    #[serde(default)]
    pub duration: Option<String>,

    /// Rendition behind each item's videoUrl: hd (default), sd or original.
    #[serde(default)]
    pub quality: Option<String>,
}

/// Fetch, normalize and cache the popular listing.
pub async fn popular_videos(state: &WidgetState, params: PopularVideosParams) -> Result<MediaListOutput, Error> {
    let client = state.pexels_client(params.api_key.as_deref())?;
    let filter = parse_duration(non_blank(params.duration.as_deref()))?;
    let quality = VideoQuality::from_param(params.quality.as_deref().unwrap_or_default())?;

    let req = PopularRequest {
        per_page: page_size(params.per_page),
        page: params.page,
        min_width: params.min_width.filter(|width| *width > 0),
    };
    req.validate()?;

    let key = client.popular_cache_key(&req, quality);
    let (items, cache_hit) = state
        .cached(&key, state.config.popular_ttl(), || async {
            let page = client.popular(&req).await?;
            Ok::<_, PexelsError>(transform_videos(&page.videos, quality))
        })
        .await
        .map_err(|e| describe_pexels_error("popular_videos", e))?;

    let items = filter.apply(items);
    tracing::info!(count = items.len(), cache_hit, "popular_videos");
    Ok(MediaListOutput::new(items, cache_hit))
}

/// Implementation of the popular_videos tool.
pub async fn popular_impl(state: &WidgetState, params: PopularVideosParams) -> Result<CallToolResult, McpError> {
    let output = popular_videos(state, params).await?;
    json_result(&output)
}
