//! MCP Server implementation.
//!
//! The server handler owns the tool router and the Spotify API handle shared
//! by every tool. Tools are defined in `domains/tools/definitions/`, one file
//! per tool; the router is assembled in `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::spotify::{SpotifyApi, SpotifyClient};
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

const INSTRUCTIONS: &str = "Tools for managing Spotify playlists. Use get_playlist to inspect a \
     playlist and its snapshot ID, get_playlist_tracks to page through its items, then \
     update_playlist, add_tracks_to_playlist, remove_tracks_from_playlist or \
     reorder_playlist_tracks to edit it. Playlist and track references may be IDs, \
     spotify: URIs or open.spotify.com links. Track positions are 0-based.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Spotify API handle shared by all tools.
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    api: Arc<dyn SpotifyApi>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the Spotify Web API.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let client = SpotifyClient::new(&config.spotify)?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create a server backed by an arbitrary `SpotifyApi` implementation.
    pub fn with_api(config: Config, api: Arc<dyn SpotifyApi>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(api.clone()),
            config: Arc::new(config),
            api,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Usage instructions advertised to clients.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        ToolRegistry::new(self.api.clone())
            .call_tool(name, arguments)
            .await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::spotify::mock::MockSpotify;

    fn test_server() -> McpServer {
        McpServer::with_api(Config::default(), Arc::new(MockSpotify::new()))
    }

    #[test]
    fn test_server_info() {
        let server = test_server();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert_eq!(info.server_info.name, "spotify-playlist-mcp");
        assert!(info.instructions.unwrap().contains("get_playlist"));
    }

    #[test]
    fn test_list_tools() {
        let tools = test_server().list_tools();
        assert_eq!(tools.len(), 6);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_tool_handler_routes_every_tool() {
        fn assert_handler<H: ServerHandler>(_: &H) {}

        let server = test_server();
        assert_handler(&server);
        assert_eq!(server.tool_router.list_all().len(), 6);
    }

    #[test]
    fn test_new_builds_real_client_without_token() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "spotify-playlist-mcp");
    }
}
