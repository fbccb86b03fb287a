//! Tool Registry - tool metadata and HTTP dispatch.

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{
    AddTracksTool, GetPlaylistTool, GetPlaylistTracksTool, RemoveTracksTool, ReorderTracksTool,
    UpdatePlaylistTool,
};
#[cfg(feature = "http")]
use super::ToolError;
use crate::domains::spotify::SpotifyApi;

/// Tool registry - lists tools and dispatches HTTP tool calls.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    api: Arc<dyn SpotifyApi>,
}

impl ToolRegistry {
    /// Create a new tool registry backed by the given API handle.
    pub fn new(api: Arc<dyn SpotifyApi>) -> Self {
        Self { api }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetPlaylistTool::NAME,
            GetPlaylistTracksTool::NAME,
            UpdatePlaylistTool::NAME,
            AddTracksTool::NAME,
            RemoveTracksTool::NAME,
            ReorderTracksTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GetPlaylistTool::to_tool(),
            GetPlaylistTracksTool::to_tool(),
            UpdatePlaylistTool::to_tool(),
            AddTracksTool::to_tool(),
            RemoveTracksTool::to_tool(),
            ReorderTracksTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let api = self.api.clone();
        match name {
            GetPlaylistTool::NAME => GetPlaylistTool::http_handler(arguments, api).await,
            GetPlaylistTracksTool::NAME => {
                GetPlaylistTracksTool::http_handler(arguments, api).await
            }
            UpdatePlaylistTool::NAME => UpdatePlaylistTool::http_handler(arguments, api).await,
            AddTracksTool::NAME => AddTracksTool::http_handler(arguments, api).await,
            RemoveTracksTool::NAME => RemoveTracksTool::http_handler(arguments, api).await,
            ReorderTracksTool::NAME => ReorderTracksTool::http_handler(arguments, api).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
