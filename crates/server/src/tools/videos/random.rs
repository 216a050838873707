//! random_videos tool implementation.
//!
//! Picks a random keyword for a category and a random shallow page, searches,
//! then shuffles the results.

use std::collections::HashSet;

use pexwall_core::{Error, MediaItem};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::parse_duration;
use super::search::{SearchVideosParams, run_search};
use crate::state::WidgetState;
use crate::tools::params::{lenient_u32, non_blank};
use crate::tools::{MediaListOutput, json_result};

/// Default number of videos.
pub const DEFAULT_COUNT: u32 = 12;

/// Deepest page a random pick may land on.
pub const MAX_RANDOM_PAGE: u32 = 5;

/// Search terms per category. `all` is used for the `all` category.
pub const RANDOM_KEYWORDS: &[(&str, &[&str])] = &[
    ("all", &["nature", "ocean", "mountain", "city", "sky", "forest", "abstract", "technology", "people", "animals"]),
    ("nature", &["forest", "trees", "plants", "flowers", "landscape", "sunset", "sunrise"]),
    ("ocean", &["waves", "sea", "beach", "underwater", "dolphins", "coral", "sailing"]),
    ("mountain", &["peaks", "valley", "hiking", "snow", "rocks", "canyon", "cliff"]),
    ("city", &["skyline", "lights", "traffic", "buildings", "night", "urban", "street"]),
    ("sky", &["clouds", "stars", "moon", "sunrise", "sunset", "storm", "clear"]),
    ("forest", &["trees", "woodland", "jungle", "leaves", "wildlife", "stream"]),
    ("animals", &["wildlife", "birds", "fish", "insects", "mammals", "pets"]),
    ("technology", &["computer", "digital", "data", "network", "innovation", "future"]),
    ("abstract", &["motion", "colors", "patterns", "geometric", "fluid", "particles"]),
];

/// Input parameters for random_videos tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RandomVideosParams {
    /// Pexels API key. Falls back to the configured key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Category: all (default), nature, ocean, mountain, city, sky, forest,
    /// animals, technology or abstract. Other values are searched as-is.
    #[serde(default)]
    pub category: Option<String>,

    /// Number of videos (1-80, default 12).
    #[serde(default, deserialize_with = "lenient_u32")]
    pub count: Option<u32>,

    /// Duration filter: all, short, medium or long.
    #[serde(default)]
    pub duration: Option<String>,

    /// Rendition behind each item's videoUrl: hd (default), sd or original.
    #[serde(default)]
    pub quality: Option<String>,
}

/// Pick a search term for `category`.
///
/// Known categories draw from their keyword list; unknown ones search the
/// category word itself.
pub fn pick_search_term<R: Rng + ?Sized>(category: &str, rng: &mut R) -> String {
    let category = category.trim().to_lowercase();
    let category = if category.is_empty() { "all".to_string() } else { category };

    RANDOM_KEYWORDS
        .iter()
        .find(|(name, _)| *name == category)
        .and_then(|(_, terms)| terms.choose(rng))
        .map(|term| term.to_string())
        .unwrap_or(category)
}

/// Fisher-Yates shuffle, drop repeated ids, keep at most `count`.
pub fn shuffle_unique<R: Rng + ?Sized>(mut items: Vec<MediaItem>, count: usize, rng: &mut R) -> Vec<MediaItem> {
    items.shuffle(rng);
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.id.clone()));
    items.truncate(count);
    items
}

/// Search a random term on a random page and shuffle the results.
pub async fn random_videos(state: &WidgetState, params: RandomVideosParams) -> Result<MediaListOutput, Error> {
    state.pexels_client(params.api_key.as_deref())?;
    let filter = parse_duration(non_blank(params.duration.as_deref()))?;

    let count = params.count.unwrap_or(DEFAULT_COUNT);
    let category = non_blank(params.category.as_deref()).unwrap_or("all");

    let (term, page) = {
        let mut rng = rand::rng();
        (pick_search_term(category, &mut rng), rng.random_range(1..=MAX_RANDOM_PAGE))
    };
    tracing::debug!(category, term = %term, page, "random video pick");

    let search = SearchVideosParams {
        api_key: params.api_key,
        query: Some(term),
        per_page: Some(count),
        page: Some(page),
        quality: params.quality,
        ..Default::default()
    };
    let output = run_search(state, search, state.config.random_ttl()).await?;

    let items = shuffle_unique(output.items, count as usize, &mut rand::rng());
    let items = filter.apply(items);
    tracing::info!(category, count = items.len(), "random_videos");
    Ok(MediaListOutput::new(items, output.cache_hit))
}

/// Implementation of the random_videos tool.
pub async fn random_impl(state: &WidgetState, params: RandomVideosParams) -> Result<CallToolResult, McpError> {
    let output = random_videos(state, params).await?;
    json_result(&output)
}
