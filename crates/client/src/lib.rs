//! Client code for pexwall.
//!
//! This crate provides the rate-limited HTTP fetch pipeline, the Pexels video
//! API client and the wallpaper listing scraper shared by the server.

pub mod fetch;
pub mod pexels;
pub mod wallpaper;

pub use fetch::{FetchClient, FetchConfig, FetchResponse, RateLimiter};
pub use pexels::{
    Orientation, PexelsClient, PexelsConfig, PexelsError, PopularRequest, SearchRequest, SizeFilter, TransformError,
    VideoQuality, to_media_item, transform_videos,
};
pub use wallpaper::{Category, WallpaperClient, WallpaperError, find_category, listing_path, match_categories};
