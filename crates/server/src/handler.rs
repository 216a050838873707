//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::state::WidgetState;
use crate::tools::cache::{CacheClearParams, clear_impl, stats_impl};
use crate::tools::videos::detail::{VideoDetailParams, detail_impl};
use crate::tools::videos::popular::{PopularVideosParams, popular_impl};
use crate::tools::videos::quick::{QuickSearchParams, quick_impl};
use crate::tools::videos::random::{RandomVideosParams, random_impl};
use crate::tools::videos::search::{SearchVideosParams, search_impl};
use crate::tools::videos::verify::{VerifyApiKeyParams, verify_impl};
use crate::tools::wallpapers::category::{WallpaperCategoryParams, category_impl};
use crate::tools::wallpapers::random::WallpaperRandomParams;
use crate::tools::wallpapers::search::WallpaperSearchParams;
use crate::tools::wallpapers::{random as wallpaper_random, search as wallpaper_search};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for pexwall.
#[derive(Clone)]
pub struct PexwallServer {
    state: Arc<WidgetState>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl PexwallServer {
    /// Create a new server handler over shared state.
    pub fn new(state: Arc<WidgetState>) -> Self {
        Self { state, tool_router: Self::tool_router() }
    }

    #[tool(description = "List popular Pexels videos. Optional per_page (1-80), page, min_width, duration (all, short, medium, long) and quality (hd, sd, original).")]
    async fn popular_videos(&self, params: Parameters<PopularVideosParams>) -> Result<CallToolResult, McpError> {
        popular_impl(&self.state, params.0).await
    }

    /// Search Pexels videos.
    ///
    /// Orientation and size filters set to "all" are not sent to the API.
    #[tool(description = "Search Pexels videos by keyword. Optional orientation, size, per_page (1-80), page, duration and quality (hd, sd, original).")]
    async fn search_videos(&self, params: Parameters<SearchVideosParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.state, params.0).await
    }

    #[tool(description = "Random Pexels videos for a category (nature, ocean, mountain, city, sky, forest, animals, technology, abstract or all). Optional count, duration and quality.")]
    async fn random_videos(&self, params: Parameters<RandomVideosParams>) -> Result<CallToolResult, McpError> {
        random_impl(&self.state, params.0).await
    }

    #[tool(description = "Search box action: a keyword searches videos, a blank keyword lists popular videos.")]
    async fn quick_search(&self, params: Parameters<QuickSearchParams>) -> Result<CallToolResult, McpError> {
        quick_impl(&self.state, params.0).await
    }

    #[tool(description = "Fetch one Pexels video by id (12345 or pexels_12345).")]
    async fn video_detail(&self, params: Parameters<VideoDetailParams>) -> Result<CallToolResult, McpError> {
        detail_impl(&self.state, params.0).await
    }

    /// Check a Pexels API key.
    ///
    /// Answers `{valid, message}` even when the key is rejected.
    #[tool(description = "Check whether a Pexels API key works. Returns {valid, message}.")]
    async fn verify_api_key(&self, params: Parameters<VerifyApiKeyParams>) -> Result<CallToolResult, McpError> {
        verify_impl(&self.state, params.0).await
    }

    #[tool(description = "List wallpapers for a category id, or the homepage when no category is given. Failures come back as an error item.")]
    async fn wallpaper_category(
        &self, params: Parameters<WallpaperCategoryParams>,
    ) -> Result<CallToolResult, McpError> {
        category_impl(&self.state, params.0).await
    }

    #[tool(description = "Search wallpapers by matching the keyword against category names. Failures come back as an error item.")]
    async fn wallpaper_search(&self, params: Parameters<WallpaperSearchParams>) -> Result<CallToolResult, McpError> {
        wallpaper_search::search_impl(&self.state, params.0).await
    }

    #[tool(description = "Random wallpapers from the homepage listing. Optional count (default 12).")]
    async fn wallpaper_random(&self, params: Parameters<WallpaperRandomParams>) -> Result<CallToolResult, McpError> {
        wallpaper_random::random_impl(&self.state, params.0).await
    }

    #[tool(description = "Result cache statistics: entries, hits, misses and outbound request count.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.state).await
    }

    #[tool(description = "Clear the result cache. Set expired_only to remove only expired entries.")]
    async fn cache_clear(&self, params: Parameters<CacheClearParams>) -> Result<CallToolResult, McpError> {
        clear_impl(&self.state, params.0).await
    }
}

impl ServerHandler for PexwallServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "pexwall".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Background video and wallpaper browser. Pexels tools take an optional api_key; \
                 items come back as JSON {items, count, cacheHit}."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
