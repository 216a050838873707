//! Normalized media item schema.
//!
//! Every provider transform produces [`MediaItem`] values; the server hands
//! them to the host unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of a normalized item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
    /// Synthetic item carrying a failure message.
    Error,
    /// Synthetic item carrying a notice (e.g. no results).
    Info,
}

/// One rendition of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaVariant {
    pub url: String,
    pub quality: String,
    pub width: u32,
    pub height: u32,
    pub file_type: String,
    pub size: u64,
}

impl MediaVariant {
    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Normalized display item returned by every widget action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Source page for the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Whole seconds.
    pub duration: u32,
    pub duration_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<MediaVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl MediaItem {
    /// Create an item with the given identity and empty optional fields.
    pub fn new(id: impl Into<String>, kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: String::new(),
            cover_url: None,
            video_url: None,
            preview_url: None,
            image_url: None,
            link: None,
            duration: 0,
            duration_text: format_duration(0),
            genre_title: None,
            category: None,
            author: None,
            author_url: None,
            tags: Vec::new(),
            variants: Vec::new(),
            width: None,
            height: None,
            provider: String::new(),
            release_date: None,
        }
    }

    /// Synthetic error item for surfaces that report failures in-band.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { description: message.into(), ..Self::new("error", MediaKind::Error, title) }
    }

    /// Synthetic notice item.
    pub fn info(id: impl Into<String>, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { description: message.into(), ..Self::new(id, MediaKind::Info, title) }
    }

    /// Set duration and its display text together.
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = seconds;
        self.duration_text = format_duration(i64::from(seconds));
        self
    }
}

/// Format whole seconds as zero-padded `mm:ss`.
///
/// Missing or non-positive durations render as `00:00`. Minutes are padded to
/// two digits and grow past that for clips of 100 minutes or more.
pub fn format_duration(seconds: i64) -> String {
    if seconds <= 0 {
        return "00:00".to_string();
    }
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Duration bucket used to post-filter video lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DurationFilter {
    #[default]
    All,
    /// Up to 30 seconds.
    Short,
    /// Over 30 and up to 120 seconds.
    Medium,
    /// Over 120 seconds.
    Long,
}

impl DurationFilter {
    /// Parse a host parameter value; `None` for unrecognized input.
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    pub fn matches(self, seconds: u32) -> bool {
        match self {
            Self::All => true,
            Self::Short => seconds <= 30,
            Self::Medium => seconds > 30 && seconds <= 120,
            Self::Long => seconds > 120,
        }
    }

    /// Keep only items whose duration falls in this bucket.
    pub fn apply(self, items: Vec<MediaItem>) -> Vec<MediaItem> {
        if self == Self::All {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item.duration)).collect()
    }
}
