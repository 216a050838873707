//! Pexels video tools.
//!
//! Failures on this surface are returned as MCP errors. An unusable listing
//! body is not a failure: it yields an empty list.

pub mod detail;
pub mod popular;
pub mod quick;
pub mod random;
pub mod search;
pub mod verify;

use pexwall_client::PexelsError;
use pexwall_core::{DurationFilter, Error};

/// Map a client failure to the user-facing error for `action`.
pub fn describe_pexels_error(action: &str, err: PexelsError) -> Error {
    let err = Error::from(err);
    tracing::warn!(action, error = %err, "Pexels request failed");
    err
}

/// Parse the optional `duration` post-filter.
pub fn parse_duration(value: Option<&str>) -> Result<DurationFilter, Error> {
    match value {
        None => Ok(DurationFilter::All),
        Some(raw) => DurationFilter::from_param(raw)
            .ok_or_else(|| Error::InvalidInput(format!("unknown duration filter: {raw} (use all, short, medium or long)"))),
    }
}

/// Narrow a host-supplied page size. Out-of-range values fail request validation.
pub fn page_size(value: Option<u32>) -> Option<u8> {
    value.map(|n| u8::try_from(n).unwrap_or(u8::MAX))
}
