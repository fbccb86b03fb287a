//! Tool Router - builds the rmcp ToolRouter for the STDIO transport.
//!
//! Each tool knows how to create its own route; this module only wires them
//! to the shared Spotify API handle.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    AddTracksTool, GetPlaylistTool, GetPlaylistTracksTool, RemoveTracksTool, ReorderTracksTool,
    UpdatePlaylistTool,
};
use crate::domains::spotify::SpotifyApi;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(api: Arc<dyn SpotifyApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetPlaylistTool::create_route(api.clone()))
        .with_route(GetPlaylistTracksTool::create_route(api.clone()))
        .with_route(UpdatePlaylistTool::create_route(api.clone()))
        .with_route(AddTracksTool::create_route(api.clone()))
        .with_route(RemoveTracksTool::create_route(api.clone()))
        .with_route(ReorderTracksTool::create_route(api))
}
