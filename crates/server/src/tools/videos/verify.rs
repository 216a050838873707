//! verify_api_key tool implementation.
//!
//! Reports whether a key works. Failures are part of the answer, not errors.

use pexwall_core::Error;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WidgetState;
use crate::tools::json_result;

/// Input parameters for verify_api_key tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VerifyApiKeyParams {
    /// Key to check. Falls back to the configured key.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Output for verify_api_key tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerifyOutput {
    pub valid: bool,
    pub message: String,
}

impl VerifyOutput {
    fn invalid(err: &Error) -> Self {
        Self { valid: false, message: err.user_message() }
    }
}

/// Check a key with a one-item request.
pub async fn verify_api_key(state: &WidgetState, params: VerifyApiKeyParams) -> VerifyOutput {
    let client = match state.pexels_client(params.api_key.as_deref()) {
        Ok(client) => client,
        Err(err) => return VerifyOutput::invalid(&err),
    };

    match client.verify().await {
        Ok(()) => {
            tracing::info!("API key verified");
            VerifyOutput { valid: true, message: "API key is valid".into() }
        }
        Err(err) => {
            tracing::warn!(error = %err, "API key verification failed");
            VerifyOutput::invalid(&Error::from(err))
        }
    }
}

/// Implementation of the verify_api_key tool.
pub async fn verify_impl(state: &WidgetState, params: VerifyApiKeyParams) -> Result<CallToolResult, McpError> {
    let output = verify_api_key(state, params).await;
    json_result(&output)
}
