//! wallpaper_search tool implementation.
//!
//! The site has no search endpoint. Keywords are matched against category
//! names and aliases, and the matched listings are merged.

use pexwall_client::{WallpaperError, match_categories};
use pexwall_client::wallpaper::HOMEPAGE_PATH;
use pexwall_core::{Error, MediaItem};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::load_listing;
use crate::state::WidgetState;
use crate::tools::params::non_blank;
use crate::tools::{MediaListOutput, json_result};

/// Items taken from each matched category.
pub const PER_CATEGORY: usize = 6;

/// Items taken from the homepage when nothing matches.
pub const FALLBACK_COUNT: usize = 12;

/// Input parameters for wallpaper_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WallpaperSearchParams {
    /// Keyword, matched against category names such as "anime" or "风景".
    #[serde(default)]
    pub keyword: Option<String>,
}

async fn collect(state: &WidgetState, keyword: &str) -> Result<(Vec<MediaItem>, bool), WallpaperError> {
    let matched = match_categories(keyword);
    if matched.is_empty() {
        tracing::debug!(keyword, "no category matched, using homepage");
        let (mut items, hit) = load_listing(state, HOMEPAGE_PATH).await?;
        items.truncate(FALLBACK_COUNT);
        return Ok((items, hit));
    }

    let mut items = Vec::new();
    let mut all_hit = true;
    for category in matched {
        let (listing, hit) = load_listing(state, &category.path()).await?;
        all_hit &= hit;
        items.extend(listing.into_iter().take(PER_CATEGORY));
    }
    Ok((items, all_hit))
}

pub async fn wallpaper_search(state: &WidgetState, params: WallpaperSearchParams) -> MediaListOutput {
    let Some(keyword) = non_blank(params.keyword.as_deref()) else {
        let err = Error::InvalidInput("please enter a search keyword".into());
        return MediaListOutput::error("Wallpaper search failed", &err);
    };

    match collect(state, keyword).await {
        Ok((items, _)) if items.is_empty() => MediaListOutput::new(
            vec![MediaItem::info("no_results", "No results", format!("no wallpapers found for \"{keyword}\""))],
            false,
        ),
        Ok((items, cache_hit)) => {
            tracing::info!(keyword, count = items.len(), cache_hit, "wallpaper_search");
            MediaListOutput::new(items, cache_hit)
        }
        Err(err) => {
            let err = Error::from(err);
            tracing::warn!(keyword, error = %err, "wallpaper search failed");
            MediaListOutput::error("Wallpaper search failed", &err)
        }
    }
}

/// Implementation of the wallpaper_search tool.
pub async fn search_impl(state: &WidgetState, params: WallpaperSearchParams) -> Result<CallToolResult, McpError> {
    let output = wallpaper_search(state, params).await;
    json_result(&output)
}
