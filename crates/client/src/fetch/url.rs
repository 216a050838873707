//! URL canonicalization and media URL resolution.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a base URL string.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    ensure_http(&parsed)?;

    if let Some(host) = parsed.host_str() {
        let host = host.to_lowercase();
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Resolve a scraped media reference against the page's base URL.
///
/// - `//host/path` becomes `https://host/path`
/// - `/path` and `path` are joined onto `base`
/// - absolute `http(s)` URLs are kept as is
/// - any other scheme is rejected
pub fn resolve_media_url(raw: &str, base: &url::Url) -> Result<url::Url, UrlError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let resolved = if let Some(rest) = trimmed.strip_prefix("//") {
        url::Url::parse(&format!("https://{rest}"))
    } else {
        base.join(trimmed)
    }
    .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    ensure_http(&resolved)?;
    Ok(resolved)
}

fn ensure_http(url: &url::Url) -> Result<(), UrlError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}
