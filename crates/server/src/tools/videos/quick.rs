//! quick_search tool implementation.
//!
//! One-field search used by the widget's search box. A blank keyword shows
//! the popular listing instead of failing.

use pexwall_core::Error;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::popular::{PopularVideosParams, popular_videos};
use super::search::{SearchVideosParams, search_videos};
use crate::state::WidgetState;
use crate::tools::params::non_blank;
use crate::tools::{MediaListOutput, json_result};

/// Page size for quick results.
pub const QUICK_PAGE_SIZE: u32 = 10;

/// Input parameters for quick_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct QuickSearchParams {
    /// Pexels API key. Falls back to the configured key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Keyword; blank shows popular videos.
    #[serde(default)]
    pub keyword: Option<String>,
}

pub async fn quick_search(state: &WidgetState, params: QuickSearchParams) -> Result<MediaListOutput, Error> {
    match non_blank(params.keyword.as_deref()) {
        None => {
            tracing::debug!("quick_search without keyword, listing popular");
            let popular = PopularVideosParams {
                api_key: params.api_key,
                per_page: Some(QUICK_PAGE_SIZE),
                ..Default::default()
            };
            popular_videos(state, popular).await
        }
        Some(keyword) => {
            let search = SearchVideosParams {
                api_key: params.api_key,
                query: Some(keyword.to_string()),
                per_page: Some(QUICK_PAGE_SIZE),
                page: Some(1),
                ..Default::default()
            };
            search_videos(state, search).await
        }
    }
}

/// Implementation of the quick_search tool.
pub async fn quick_impl(state: &WidgetState, params: QuickSearchParams) -> Result<CallToolResult, McpError> {
    let output = quick_search(state, params).await?;
    json_result(&output)
}
