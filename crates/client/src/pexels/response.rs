//! Pexels video API response types and lenient page decoding.

use serde::Deserialize;
use serde_json::Value;

/// Raw video object from the Pexels API. Only `id` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoRecord {
    pub id: u64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Source page on pexels.com.
    #[serde(default)]
    pub url: Option<String>,
    /// Poster image.
    #[serde(default)]
    pub image: Option<String>,
    /// Length in seconds, possibly fractional.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub user: Option<VideoUser>,
    #[serde(default)]
    pub video_files: Option<Vec<VideoFile>>,
    #[serde(default)]
    pub video_pictures: Option<Vec<VideoPicture>>,
    #[serde(default)]
    pub tags: Option<Tags>,
}

/// One rendition of a video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoFile {
    #[serde(default)]
    pub id: Option<u64>,
    /// `hd`, `sd`, `uhd` or absent.
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl VideoFile {
    /// Pixel count, treating missing dimensions as 0.
    pub fn pixels(&self) -> u64 {
        u64::from(self.width.unwrap_or(0)) * u64::from(self.height.unwrap_or(0))
    }

    /// Non-blank link, if any.
    pub fn playable_link(&self) -> Option<&str> {
        self.link.as_deref().map(str::trim).filter(|link| !link.is_empty())
    }

    pub fn has_quality(&self, quality: &str) -> bool {
        self.quality.as_deref().is_some_and(|q| q.eq_ignore_ascii_case(quality))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoPicture {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub nr: Option<u32>,
}

/// Tags arrive either as a list or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    List(Vec<String>),
    Csv(String),
}

impl Tags {
    /// Trimmed, non-empty tag values.
    pub fn to_vec(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Tags::List(items) => items.iter().map(String::as_str).collect(),
            Tags::Csv(joined) => joined.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One decoded listing page.
#[derive(Debug, Clone, Default)]
pub struct VideoPage {
    pub videos: Vec<VideoRecord>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_results: Option<u64>,
    pub next_page: Option<String>,
    /// Records that failed to deserialize.
    pub dropped: usize,
}

/// Decode a listing response.
///
/// A body that is not JSON, or has no `videos` array, yields an empty page.
/// Records are decoded one at a time so a malformed entry only drops itself.
pub fn decode_page(bytes: &[u8]) -> VideoPage {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Pexels response is not JSON: {}", e);
            return VideoPage::default();
        }
    };

    let mut page = VideoPage {
        page: value.get("page").and_then(Value::as_u64).and_then(|p| u32::try_from(p).ok()),
        per_page: value.get("per_page").and_then(Value::as_u64).and_then(|p| u32::try_from(p).ok()),
        total_results: value.get("total_results").and_then(Value::as_u64),
        next_page: value.get("next_page").and_then(Value::as_str).map(str::to_string),
        ..Default::default()
    };

    let Some(records) = value.get("videos").and_then(Value::as_array) else {
        tracing::warn!("Pexels response has no videos array");
        return page;
    };

    for record in records {
        match VideoRecord::deserialize(record) {
            Ok(video) => page.videos.push(video),
            Err(e) => {
                tracing::debug!("dropping malformed video record: {}", e);
                page.dropped += 1;
            }
        }
    }

    page
}
