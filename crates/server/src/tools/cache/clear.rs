//! cache_clear tool implementation.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WidgetState;
use crate::tools::json_result;
use crate::tools::params::lenient_bool;

/// Parameters for the cache_clear tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheClearParams {
    /// Only remove expired entries (default false).
    #[serde(default, deserialize_with = "lenient_bool")]
    pub expired_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheClearOutput {
    pub removed: usize,
    pub expired_only: bool,
}

pub async fn cache_clear(state: &WidgetState, params: CacheClearParams) -> CacheClearOutput {
    let expired_only = params.expired_only.unwrap_or(false);
    let removed = if expired_only { state.cache.purge_expired().await } else { state.cache.clear().await };
    tracing::info!(removed, expired_only, "cache cleared");
    CacheClearOutput { removed, expired_only }
}

/// Implementation of the cache_clear tool.
pub async fn clear_impl(state: &WidgetState, params: CacheClearParams) -> Result<CallToolResult, McpError> {
    let output = cache_clear(state, params).await;
    json_result(&output)
}
