//! Wallpaper listing extraction from HTML documents.

use pexwall_core::{MediaItem, MediaKind};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

use crate::fetch::resolve_media_url;
use crate::wallpaper::{PROVIDER, WallpaperError, find_category};

/// One wallpaper marker scraped from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperRecord {
    /// Numeric id, as it appears in the page.
    pub id: String,
    pub title: Option<String>,
    pub category_id: Option<String>,
    /// `data-wallpaper-type == "1"`.
    pub dynamic: bool,
    /// Image reference before resolution.
    pub image_src: String,
}

static MARKER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[data-image-id]").expect("valid selector"));
static DETAIL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[data-detail]").expect("valid selector"));
static CLASSIFY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[data-classify-id]").expect("valid selector"));
static WALLPAPER_TYPE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[data-wallpaper-type]").expect("valid selector"));
static DATA_SRC: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[data-src]").expect("valid selector"));
static SRC: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[src]").expect("valid selector"));

/// Read an attribute from the element, or from its first descendant carrying it.
///
/// `selector` must match elements carrying `attr`.
fn lookup(element: ElementRef<'_>, attr: &str, selector: &Selector) -> Option<String> {
    element
        .value()
        .attr(attr)
        .or_else(|| element.select(selector).find_map(|child| child.value().attr(attr)))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn image_source(element: ElementRef<'_>) -> Option<String> {
    lookup(element, "data-src", &DATA_SRC).or_else(|| lookup(element, "src", &SRC))
}

/// Extract wallpaper markers from a listing page.
///
/// Every element carrying `data-image-id` is a candidate. Candidates with a
/// non-numeric id or no image source are dropped, as are repeated ids.
/// A page with no candidates at all is a parse failure.
pub fn extract_wallpapers(html: &str) -> Result<Vec<WallpaperRecord>, WallpaperError> {
    let document = Html::parse_document(html);

    let mut markers = 0usize;
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for element in document.select(&MARKER) {
        markers += 1;

        let id = element.value().attr("data-image-id").unwrap_or_default().trim();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            tracing::debug!(id, "dropping wallpaper with malformed id");
            continue;
        }

        let Some(image_src) = image_source(element) else {
            tracing::debug!(id, "dropping wallpaper without image source");
            continue;
        };

        if !seen.insert(id.to_string()) {
            continue;
        }

        records.push(WallpaperRecord {
            id: id.to_string(),
            title: lookup(element, "data-detail", &DETAIL),
            category_id: lookup(element, "data-classify-id", &CLASSIFY),
            dynamic: lookup(element, "data-wallpaper-type", &WALLPAPER_TYPE).as_deref() == Some("1"),
            image_src,
        });
    }

    if markers == 0 {
        return Err(WallpaperError::NoMarkers);
    }

    Ok(records)
}

/// Convert a scraped record into an item, resolving URLs against `base`.
pub fn to_media_item(record: &WallpaperRecord, base: &Url) -> Result<MediaItem, WallpaperError> {
    let image = resolve_media_url(&record.image_src, base).map_err(|e| WallpaperError::InvalidUrl(e.to_string()))?;
    let detail = base
        .join(&format!("/dn/pd{}.html", record.id))
        .map_err(|e| WallpaperError::InvalidUrl(e.to_string()))?;

    let kind = if record.dynamic { MediaKind::Video } else { MediaKind::Image };
    let title = record.title.clone().unwrap_or_else(|| format!("Wallpaper {}", record.id));
    let category = record
        .category_id
        .as_deref()
        .and_then(find_category)
        .map_or("Unknown", |category| category.name);

    let mut item = MediaItem::new(format!("wallpaper_{}", record.id), kind, title);
    item.description = if record.dynamic {
        format!("{category} live wallpaper")
    } else {
        format!("{category} wallpaper")
    };
    item.provider = PROVIDER.to_string();
    item.cover_url = Some(image.to_string());
    item.image_url = Some(image.to_string());
    item.link = Some(detail.to_string());
    item.category = Some(category.to_string());
    item.genre_title = Some(if record.dynamic { "Live wallpaper" } else { "Static wallpaper" }.to_string());

    Ok(item)
}

/// Convert a batch, dropping records that cannot be normalized.
pub fn to_media_items(records: &[WallpaperRecord], base: &Url) -> Vec<MediaItem> {
    records
        .iter()
        .filter_map(|record| match to_media_item(record, base) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(id = %record.id, "dropping wallpaper: {}", e);
                None
            }
        })
        .collect()
}
