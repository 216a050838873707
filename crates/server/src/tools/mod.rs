//! MCP tool implementations.
//!
//! This module contains all tools exposed by the pexwall server. Each widget
//! action is a pair: a function returning typed output, and an `*_impl`
//! wrapper producing the MCP tool result.

pub mod cache;
pub mod params;
pub mod videos;
pub mod wallpapers;

use pexwall_core::{Error, MediaItem};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output shared by every listing tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaListOutput {
    pub items: Vec<MediaItem>,
    pub count: usize,
    /// Whether the listing was served from the cache.
    pub cache_hit: bool,
}

impl MediaListOutput {
    pub fn new(items: Vec<MediaItem>, cache_hit: bool) -> Self {
        Self { count: items.len(), items, cache_hit }
    }

    /// Single synthetic error item.
    pub fn error(title: &str, err: &Error) -> Self {
        Self::new(vec![MediaItem::error(title, err.user_message())], false)
    }
}

/// Serialize a tool output as pretty JSON text content.
pub fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
