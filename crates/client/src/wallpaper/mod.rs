//! Wallpaper site scraper.
//!
//! Listing pages are fetched through the shared [`FetchClient`] and parsed
//! with `scraper`. Paths:
//!
//! - homepage: `/dn/d/`
//! - category: `/dn/c{id}d/`, except 4K which lives under a tag path
//! - detail: `/dn/pd{id}.html` (linked, never fetched)

pub mod extract;

pub use extract::{WallpaperRecord, extract_wallpapers, to_media_item, to_media_items};

use pexwall_core::cache::compute_cache_key;
use pexwall_core::{Error, MediaItem};
use url::Url;

use crate::fetch::{FetchClient, canonicalize};

pub const PROVIDER: &str = "wallpaper";

/// Default site base URL.
pub const DEFAULT_BASE_URL: &str = "https://mbizhi.cheetahfun.com";

/// Homepage listing path.
pub const HOMEPAGE_PATH: &str = "/dn/d/";

/// A browsable wallpaper category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Site classify id.
    pub id: &'static str,
    pub name: &'static str,
    /// Site label, matched by keyword search alongside `name`.
    pub alias: &'static str,
    /// Listing path when it does not follow `/dn/c{id}d/`.
    special_path: Option<&'static str>,
}

impl Category {
    pub fn path(&self) -> String {
        match self.special_path {
            Some(path) => path.to_string(),
            None => format!("/dn/c{}d/", self.id),
        }
    }
}

pub const CATEGORIES: &[Category] = &[
    Category { id: "109", name: "4K", alias: "4K", special_path: Some("/dtag_109_a14fdede25965c8c0bd3ceb11f364baf/") },
    Category { id: "2", name: "Landscape", alias: "风景", special_path: None },
    Category { id: "1", name: "Anime", alias: "动漫", special_path: None },
    Category { id: "3", name: "Beauty", alias: "美女", special_path: None },
    Category { id: "6", name: "Animals", alias: "动物", special_path: None },
    Category { id: "8", name: "Games", alias: "游戏", special_path: None },
    Category { id: "17", name: "Fresh", alias: "小清新", special_path: None },
    Category { id: "9", name: "Other", alias: "其他", special_path: None },
];

/// Look up a category by classify id.
pub fn find_category(id: &str) -> Option<&'static Category> {
    let id = id.trim();
    CATEGORIES.iter().find(|category| category.id == id)
}

/// Categories whose name or alias contains the keyword, or is contained by it.
pub fn match_categories(keyword: &str) -> Vec<&'static Category> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return Vec::new();
    }

    CATEGORIES
        .iter()
        .filter(|category| {
            [category.name, category.alias].iter().any(|label| {
                let label = label.to_lowercase();
                label.contains(&keyword) || keyword.contains(&label)
            })
        })
        .collect()
}

/// Errors from the wallpaper scraper.
#[derive(Debug, thiserror::Error)]
pub enum WallpaperError {
    #[error("unknown wallpaper category: {0}")]
    UnknownCategory(String),

    /// Page contained no wallpaper markers at all.
    #[error("listing page has no wallpaper entries")]
    NoMarkers,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Fetch(#[from] Error),
}

impl From<WallpaperError> for Error {
    fn from(err: WallpaperError) -> Self {
        match err {
            WallpaperError::UnknownCategory(_) => Error::InvalidInput(err.to_string()),
            WallpaperError::NoMarkers => Error::ParseFailed(err.to_string()),
            WallpaperError::InvalidUrl(msg) => Error::InvalidUrl(msg),
            WallpaperError::Fetch(Error::FetchTimeout(_)) => {
                Error::FetchTimeout("the wallpaper site timed out, check your network connection".into())
            }
            WallpaperError::Fetch(inner) => inner,
        }
    }
}

/// Resolve the listing path for an optional category id.
///
/// `None` or a blank id selects the homepage.
pub fn listing_path(category: Option<&str>) -> Result<String, WallpaperError> {
    match category.map(str::trim).filter(|id| !id.is_empty()) {
        None => Ok(HOMEPAGE_PATH.to_string()),
        Some(id) => find_category(id)
            .map(Category::path)
            .ok_or_else(|| WallpaperError::UnknownCategory(id.to_string())),
    }
}

/// Wallpaper listing client.
#[derive(Debug, Clone)]
pub struct WallpaperClient {
    fetch: FetchClient,
    base: Url,
}

impl WallpaperClient {
    pub fn new(fetch: FetchClient, base_url: &str) -> Result<Self, WallpaperError> {
        let base = canonicalize(base_url).map_err(|e| WallpaperError::InvalidUrl(e.to_string()))?;
        Ok(Self { fetch, base })
    }

    /// Fetch and normalize one listing page.
    pub async fn listing(&self, path: &str) -> Result<Vec<MediaItem>, WallpaperError> {
        let url = self.base.join(path).map_err(|e| WallpaperError::InvalidUrl(e.to_string()))?;
        let response = self
            .fetch
            .get(url.as_str(), &[("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")])
            .await?;

        let records = extract_wallpapers(&response.text())?;
        let items = to_media_items(&records, &response.url);

        tracing::debug!(
            %url,
            content_type = response.content_type.as_deref().unwrap_or("unknown"),
            records = records.len(),
            items = items.len(),
            "parsed wallpaper listing"
        );
        Ok(items)
    }

    /// Cache key for a listing path.
    pub fn listing_cache_key(path: &str) -> String {
        compute_cache_key("wallpaper:listing", &serde_json::json!(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchConfig;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HOME: &str = r#"<html><body>
        <div data-image-id="11" data-detail="Dawn" data-classify-id="2" data-wallpaper-type="0"><img src="/i/11.jpg"></div>
        <div data-image-id="12" data-detail="Rain" data-classify-id="9" data-wallpaper-type="1"><img src="/i/12.jpg"></div>
    </body></html>"#;

    fn client(server: &MockServer) -> WallpaperClient {
        let fetch = FetchClient::new(FetchConfig { min_request_interval: Duration::ZERO, ..Default::default() }).unwrap();
        WallpaperClient::new(fetch, &server.uri()).unwrap()
    }

    #[test]
    fn test_category_paths() {
        assert_eq!(find_category("109").unwrap().path(), "/dtag_109_a14fdede25965c8c0bd3ceb11f364baf/");
        assert_eq!(find_category("2").unwrap().path(), "/dn/c2d/");
        assert_eq!(find_category(" 17 ").unwrap().path(), "/dn/c17d/");
        assert!(find_category("42").is_none());
    }

    #[test]
    fn test_listing_path() {
        assert_eq!(listing_path(None).unwrap(), "/dn/d/");
        assert_eq!(listing_path(Some("  ")).unwrap(), "/dn/d/");
        assert_eq!(listing_path(Some("6")).unwrap(), "/dn/c6d/");
        assert!(matches!(listing_path(Some("404")), Err(WallpaperError::UnknownCategory(_))));
    }

    #[test]
    fn test_match_categories_both_directions() {
        let names = |keyword: &str| match_categories(keyword).iter().map(|c| c.id).collect::<Vec<_>>();

        assert_eq!(names("anim"), vec!["1", "6"]);
        assert_eq!(names("cute ANIMALS"), vec!["6"]);
        assert_eq!(names("风景壁纸"), vec!["2"]);
        assert_eq!(names("4k"), vec!["109"]);
        assert!(names("spaceship").is_empty());
        assert!(names("  ").is_empty());
    }

    #[test]
    fn test_error_into_core() {
        assert!(matches!(Error::from(WallpaperError::UnknownCategory("5".into())), Error::InvalidInput(_)));
        assert!(matches!(Error::from(WallpaperError::NoMarkers), Error::ParseFailed(_)));
        let inner = Error::HttpError { status: 502, body: String::new() };
        assert!(matches!(Error::from(WallpaperError::Fetch(inner)), Error::HttpError { status: 502, .. }));

        let timeout = Error::FetchTimeout("request to http://127.0.0.1:1/dn/d/ timed out after 2000ms".into());
        let message = Error::from(WallpaperError::Fetch(timeout)).user_message();
        assert!(message.contains("network"));
        assert!(!message.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn test_homepage_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dn/d/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HOME))
            .expect(1)
            .mount(&server)
            .await;

        let items = client(&server).listing(HOMEPAGE_PATH).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "wallpaper_11");
        assert_eq!(items[0].image_url.as_deref(), Some(format!("{}/i/11.jpg", server.uri()).as_str()));
        assert_eq!(items[1].link.as_deref(), Some(format!("{}/dn/pd12.html", server.uri()).as_str()));
    }

    #[tokio::test]
    async fn test_category_listing_uses_special_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dtag_109_a14fdede25965c8c0bd3ceb11f364baf/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HOME))
            .expect(1)
            .mount(&server)
            .await;

        let items = client(&server).listing(&find_category("109").unwrap().path()).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_listing_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dn/d/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>down</body></html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dn/c2d/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client(&server);
        assert!(matches!(client.listing(HOMEPAGE_PATH).await, Err(WallpaperError::NoMarkers)));
        assert!(matches!(
            client.listing("/dn/c2d/").await,
            Err(WallpaperError::Fetch(Error::HttpError { status: 503, .. }))
        ));
    }
}
