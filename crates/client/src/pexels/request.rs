//! Pexels video API request types and validation.

use serde::{Deserialize, Serialize};

use crate::pexels::PexelsError;

/// Default results per page.
pub const DEFAULT_PER_PAGE: u8 = 15;

/// Largest page size the API accepts.
pub const MAX_PER_PAGE: u8 = 80;

/// Video orientation filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    /// Parse a widget parameter. Blank or `all` means no filter.
    pub fn from_param(value: &str) -> Result<Option<Self>, PexelsError> {
        match value.trim().to_lowercase().as_str() {
            "" | "all" => Ok(None),
            "landscape" => Ok(Some(Orientation::Landscape)),
            "portrait" => Ok(Some(Orientation::Portrait)),
            "square" => Ok(Some(Orientation::Square)),
            other => Err(PexelsError::InvalidFilter(format!("unknown orientation: {other}"))),
        }
    }
}

/// Minimum video size filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SizeFilter {
    Large,
    Medium,
    Small,
}

impl SizeFilter {
    /// Parse a widget parameter. Blank or `all` means no filter.
    pub fn from_param(value: &str) -> Result<Option<Self>, PexelsError> {
        match value.trim().to_lowercase().as_str() {
            "" | "all" => Ok(None),
            "large" => Ok(Some(SizeFilter::Large)),
            "medium" => Ok(Some(SizeFilter::Medium)),
            "small" => Ok(Some(SizeFilter::Small)),
            other => Err(PexelsError::InvalidFilter(format!("unknown size: {other}"))),
        }
    }
}

/// Preferred rendition for an item's `videoUrl`. Applied client-side, never sent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    #[default]
    Hd,
    Sd,
    /// Largest available file.
    Original,
}

impl VideoQuality {
    /// Parse a widget parameter. Blank means `hd`.
    pub fn from_param(value: &str) -> Result<Self, PexelsError> {
        match value.trim().to_lowercase().as_str() {
            "" | "hd" => Ok(VideoQuality::Hd),
            "sd" => Ok(VideoQuality::Sd),
            "original" => Ok(VideoQuality::Original),
            other => Err(PexelsError::InvalidFilter(format!("unknown quality: {other}"))),
        }
    }
}

/// Search request parameters for `GET /videos/search`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SearchRequest {
    /// Search query (required, not blank).
    pub query: String,

    /// Results per page (1-80, default 15).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u8>,

    /// Page number (>= 1, default 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeFilter>,
}

impl SearchRequest {
    /// Validate the search request parameters.
    ///
    /// Returns an error if any parameters are out of range or the query is blank.
    pub fn validate(&self) -> Result<(), PexelsError> {
        if self.query.trim().is_empty() {
            return Err(PexelsError::InvalidQuery("search keyword must not be empty".to_string()));
        }

        validate_paging(self.per_page, self.page)
    }

    /// Get the effective page size (default 15).
    pub fn get_per_page(&self) -> u8 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    /// Get the effective page (default 1).
    pub fn get_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// Request parameters for `GET /videos/popular`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct PopularRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Minimum width in pixels. Zero is treated as unset.
    #[serde(skip_serializing_if = "is_unset_width")]
    pub min_width: Option<u32>,
}

fn is_unset_width(width: &Option<u32>) -> bool {
    matches!(width, None | Some(0))
}

impl PopularRequest {
    pub fn validate(&self) -> Result<(), PexelsError> {
        validate_paging(self.per_page, self.page)
    }

    pub fn get_per_page(&self) -> u8 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn get_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

fn validate_paging(per_page: Option<u8>, page: Option<u32>) -> Result<(), PexelsError> {
    if let Some(per_page) = per_page
        && !(1..=MAX_PER_PAGE).contains(&per_page)
    {
        return Err(PexelsError::InvalidPerPage);
    }

    if page == Some(0) {
        return Err(PexelsError::InvalidPage);
    }

    Ok(())
}
