//! video_detail tool implementation.

use pexwall_client::{PexelsError, VideoQuality, to_media_item};
use pexwall_core::{Error, MediaItem};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::describe_pexels_error;
use crate::state::WidgetState;
use crate::tools::json_result;
use crate::tools::params::lenient_string;

/// Input parameters for video_detail tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoDetailParams {
    /// Pexels API key. Falls back to the configured key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Video id, either numeric (`12345`) or an item id (`pexels_12345`).
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
}

/// Output for video_detail tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetailOutput {
    pub item: MediaItem,
    pub cache_hit: bool,
}

/// Parse a numeric id, accepting the `pexels_` item prefix.
pub fn parse_video_id(raw: &str) -> Result<u64, Error> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix("pexels_").unwrap_or(trimmed);
    digits
        .parse::<u64>()
        .map_err(|_| Error::InvalidInput(format!("invalid video id: {trimmed:?}")))
}

/// Fetch one video and normalize it.
pub async fn video_detail(state: &WidgetState, params: VideoDetailParams) -> Result<VideoDetailOutput, Error> {
    let client = state.pexels_client(params.api_key.as_deref())?;
    let raw = params.id.unwrap_or_default();
    let id = parse_video_id(&raw)?;

    let key = client.video_cache_key(id);
    let (mut items, cache_hit) = state
        .cached(&key, state.config.detail_ttl(), || async {
            let record = client.video(id).await?;
            let item = to_media_item(&record, VideoQuality::default()).map_err(|e| PexelsError::Parse(e.to_string()))?;
            Ok::<_, PexelsError>(vec![item])
        })
        .await
        .map_err(|e| describe_pexels_error("video_detail", e))?;

    let item = items
        .pop()
        .ok_or_else(|| Error::NotFound(format!("video {id} not found")))?;
    tracing::info!(id, cache_hit, "video_detail");
    Ok(VideoDetailOutput { item, cache_hit })
}

/// Implementation of the video_detail tool.
pub async fn detail_impl(state: &WidgetState, params: VideoDetailParams) -> Result<CallToolResult, McpError> {
    let output = video_detail(state, params).await?;
    json_result(&output)
}
