//! Unified error types for pexwall.
//!
//! Every variant renders as `CODE: message`. [`Error::user_message`] drops the
//! code for display inside widget items and MCP error payloads.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the pexwall server and clients.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., blank search keyword).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Provider rejected the API key.
    #[error("INVALID_API_KEY: {0}")]
    InvalidApiKey(String),

    /// Provider rate limited the request.
    #[error("RATE_LIMITED: {0}")]
    RateLimited(String),

    /// Provider refused access to the resource.
    #[error("FORBIDDEN: {0}")]
    Forbidden(String),

    /// Connection-level failure before a response arrived.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Non-success HTTP response.
    #[error("HTTP_ERROR: status {status}")]
    HttpError { status: u16, body: String },

    /// Response body could not be decoded.
    #[error("PARSE_FAILED: {0}")]
    ParseFailed(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Requested resource does not exist.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
}

impl Error {
    /// Message without the error code prefix.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidInput(msg)
            | Error::InvalidApiKey(msg)
            | Error::RateLimited(msg)
            | Error::Forbidden(msg)
            | Error::Network(msg)
            | Error::FetchTimeout(msg)
            | Error::ParseFailed(msg)
            | Error::InvalidUrl(msg)
            | Error::NotFound(msg) => msg.clone(),
            Error::HttpError { status, body } if body.is_empty() => format!("request failed with status {status}"),
            Error::HttpError { status, body } => format!("request failed with status {status}: {body}"),
        }
    }

    /// Stable numeric code used on the MCP boundary.
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidInput(_) => -32602,
            Error::ParseFailed(_) => -32000,
            Error::NotFound(_) => -32001,
            Error::InvalidUrl(_) => -32003,
            Error::FetchTimeout(_) => -32006,
            Error::HttpError { .. } => -32008,
            Error::InvalidApiKey(_) => -32009,
            Error::RateLimited(_) => -32010,
            Error::Forbidden(_) => -32011,
            Error::Network(_) => -32012,
        }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        McpError { code: ErrorCode(err.code()), message: err.user_message().into(), data: None }
    }
}
