//! Pexels API client error types.

use pexwall_core::Error;

/// Errors from the Pexels video API client.
#[derive(Debug, thiserror::Error)]
pub enum PexelsError {
    /// No API key supplied and none configured.
    #[error("missing API key: pass api_key or set PEXWALL_PEXELS_API_KEY")]
    MissingApiKey,

    /// API key too short to be a real Pexels key.
    #[error("invalid API key format: expected more than {min} characters", min = super::MIN_API_KEY_LEN)]
    InvalidApiKey,

    /// Invalid search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid filter value (orientation or size).
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Invalid per_page parameter (must be 1-80).
    #[error("invalid per_page: must be 1-80")]
    InvalidPerPage,

    /// Invalid page parameter (must be >= 1).
    #[error("invalid page: must be at least 1")]
    InvalidPage,

    /// Pexels rejected the API key.
    #[error("authentication failed: the Pexels API key was rejected")]
    Unauthorized,

    /// Rate limited by Pexels.
    #[error("rate limited: too many requests, try again later")]
    RateLimited,

    /// Key lacks permission for the resource.
    #[error("access denied: check the API key permissions")]
    Forbidden,

    /// Video does not exist.
    #[error("video not found")]
    NotFound,

    /// Other non-success HTTP response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16, body: String },

    /// Request timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// Base URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl PexelsError {
    /// Classify a non-success response by status, then by body text.
    fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => return PexelsError::Unauthorized,
            403 => return PexelsError::Forbidden,
            404 => return PexelsError::NotFound,
            429 => return PexelsError::RateLimited,
            _ => {}
        }

        let lowered = body.to_lowercase();
        if lowered.contains("unauthorized") {
            PexelsError::Unauthorized
        } else if lowered.contains("rate limit") {
            PexelsError::RateLimited
        } else if lowered.contains("forbidden") {
            PexelsError::Forbidden
        } else {
            PexelsError::HttpError { status, body }
        }
    }
}

impl From<Error> for PexelsError {
    fn from(err: Error) -> Self {
        match err {
            Error::HttpError { status, body } => PexelsError::from_status(status, body),
            Error::FetchTimeout(msg) => PexelsError::Timeout(msg),
            Error::Network(msg) => PexelsError::Network(msg),
            Error::ParseFailed(msg) => PexelsError::Parse(msg),
            Error::InvalidUrl(msg) => PexelsError::InvalidUrl(msg),
            Error::InvalidApiKey(_) => PexelsError::Unauthorized,
            Error::RateLimited(_) => PexelsError::RateLimited,
            Error::Forbidden(_) => PexelsError::Forbidden,
            Error::NotFound(_) => PexelsError::NotFound,
            Error::InvalidInput(msg) => PexelsError::InvalidQuery(msg),
        }
    }
}

impl From<PexelsError> for Error {
    fn from(err: PexelsError) -> Self {
        match err {
            PexelsError::MissingApiKey
            | PexelsError::InvalidApiKey
            | PexelsError::InvalidQuery(_)
            | PexelsError::InvalidFilter(_)
            | PexelsError::InvalidPerPage
            | PexelsError::InvalidPage => Error::InvalidInput(err.to_string()),
            PexelsError::Unauthorized => {
                Error::InvalidApiKey("Pexels rejected the API key; check that it is correct".into())
            }
            PexelsError::RateLimited => Error::RateLimited("too many Pexels API requests, try again later".into()),
            PexelsError::Forbidden => Error::Forbidden("Pexels denied access; check the API key permissions".into()),
            PexelsError::NotFound => Error::NotFound("video not found".into()),
            PexelsError::HttpError { status, body } => Error::HttpError { status, body },
            PexelsError::Timeout(_) => {
                Error::FetchTimeout("the request timed out, check your network connection".into())
            }
            PexelsError::Network(_) => {
                Error::Network("network connection failed, check your connection".into())
            }
            PexelsError::Parse(msg) => Error::ParseFailed(msg),
            PexelsError::InvalidUrl(msg) => Error::InvalidUrl(msg),
        }
    }
}
