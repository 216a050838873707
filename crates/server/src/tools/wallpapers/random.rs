//! wallpaper_random tool implementation.

use pexwall_client::wallpaper::HOMEPAGE_PATH;
use pexwall_core::{Error, MediaItem};
use rand::Rng;
use rand::seq::SliceRandom;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::load_listing;
use crate::state::WidgetState;
use crate::tools::params::lenient_u32;
use crate::tools::{MediaListOutput, json_result};

pub const DEFAULT_COUNT: u32 = 12;

/// Input parameters for wallpaper_random tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WallpaperRandomParams {
    /// Number of wallpapers (default 12).
    #[serde(default, deserialize_with = "lenient_u32")]
    pub count: Option<u32>,
}

/// Shuffle and keep at most `count` items.
pub fn pick_random<R: Rng + ?Sized>(mut items: Vec<MediaItem>, count: usize, rng: &mut R) -> Vec<MediaItem> {
    items.shuffle(rng);
    items.truncate(count);
    items
}

pub async fn wallpaper_random(state: &WidgetState, params: WallpaperRandomParams) -> MediaListOutput {
    let count = params.count.unwrap_or(DEFAULT_COUNT) as usize;

    match load_listing(state, HOMEPAGE_PATH).await {
        Ok((items, cache_hit)) => {
            let items = pick_random(items, count, &mut rand::rng());
            tracing::info!(count = items.len(), cache_hit, "wallpaper_random");
            MediaListOutput::new(items, cache_hit)
        }
        Err(err) => {
            let err = Error::from(err);
            tracing::warn!(error = %err, "random wallpapers failed");
            MediaListOutput::error("Failed to load wallpapers", &err)
        }
    }
}

/// Implementation of the wallpaper_random tool.
pub async fn random_impl(state: &WidgetState, params: WallpaperRandomParams) -> Result<CallToolResult, McpError> {
    let output = wallpaper_random(state, params).await;
    json_result(&output)
}
