//! Wallpaper scrape tools.
//!
//! Failures on this surface never become MCP errors. They are returned as a
//! single `type: "error"` item so the widget can render them in place.

pub mod category;
pub mod random;
pub mod search;

use pexwall_client::{WallpaperClient, WallpaperError};
use pexwall_core::MediaItem;

use crate::state::WidgetState;

/// Fetch a listing path through the cache.
pub async fn load_listing(state: &WidgetState, path: &str) -> Result<(Vec<MediaItem>, bool), WallpaperError> {
    let key = WallpaperClient::listing_cache_key(path);
    state
        .cached(&key, state.config.wallpaper_ttl(), || state.wallpapers.listing(path))
        .await
}
