//! Update playlist tool.
//!
//! Changes a playlist's name, description, visibility or collaborative flag.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{failure_result, parse_playlist_id, structured_result, yes_no};
use crate::domains::spotify::SpotifyApi;
use crate::domains::spotify::model::PlaylistDetailsUpdate;
use crate::domains::tools::ToolError;

/// Parameters for the update playlist tool. At least one field besides
/// `playlist_id` must be set.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdatePlaylistParams {
    #[schemars(description = "Playlist ID, Spotify URI or open.spotify.com URL")]
    pub playlist_id: String,

    #[serde(default)]
    #[schemars(description = "New playlist name")]
    pub name: Option<String>,

    /// An empty string clears the description.
    #[serde(default)]
    #[schemars(description = "New description (empty string clears it)")]
    pub description: Option<String>,

    #[serde(default)]
    #[schemars(description = "Make the playlist public (true) or private (false)")]
    pub public: Option<bool>,

    #[serde(default)]
    #[schemars(description = "Allow other users to edit the playlist (requires public=false)")]
    pub collaborative: Option<bool>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PlaylistUpdateResult {
    pub playlist_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
}

/// Update playlist tool.
pub struct UpdatePlaylistTool;

impl UpdatePlaylistTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update_playlist";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update a Spotify playlist's name, description, public/private visibility \
         or collaborative flag. Only the fields provided are changed.";

    #[instrument(skip_all, fields(playlist_id = %params.playlist_id))]
    pub async fn execute(params: &UpdatePlaylistParams, api: &dyn SpotifyApi) -> CallToolResult {
        info!("Update playlist tool called for: {}", params.playlist_id);

        match Self::run(params, api).await {
            Ok(result) => result,
            Err(e) => failure_result("update playlist", &e),
        }
    }

    async fn run(
        params: &UpdatePlaylistParams,
        api: &dyn SpotifyApi,
    ) -> Result<CallToolResult, ToolError> {
        let playlist_id = parse_playlist_id(&params.playlist_id)?;
        let update = Self::build_update(params)?;

        api.update_playlist_details(&playlist_id, &update).await?;

        let summary = Self::format_changes(&playlist_id, &update);
        info!("Updated playlist {}", playlist_id);

        let data = PlaylistUpdateResult {
            playlist_id,
            name: update.name,
            description: update.description,
            public: update.public,
            collaborative: update.collaborative,
        };
        Ok(structured_result(summary, data))
    }

    /// Validate the requested changes and build the request body.
    pub fn build_update(params: &UpdatePlaylistParams) -> Result<PlaylistDetailsUpdate, ToolError> {
        let name = match params.name.as_deref().map(str::trim) {
            Some("") => {
                return Err(ToolError::invalid_arguments(
                    "name must not be empty when provided",
                ));
            }
            other => other.map(str::to_string),
        };

        if params.public == Some(true) && params.collaborative == Some(true) {
            return Err(ToolError::invalid_arguments(
                "a collaborative playlist cannot be public; set public=false",
            ));
        }

        let update = PlaylistDetailsUpdate {
            name,
            description: params.description.clone(),
            public: params.public,
            collaborative: params.collaborative,
        };

        if update.is_empty() {
            return Err(ToolError::invalid_arguments(
                "provide at least one of name, description, public or collaborative",
            ));
        }

        Ok(update)
    }

    fn format_changes(playlist_id: &str, update: &PlaylistDetailsUpdate) -> String {
        let mut lines = vec![format!("Updated playlist {}:", playlist_id)];
        if let Some(name) = &update.name {
            lines.push(format!("- Name: {}", name));
        }
        if let Some(description) = &update.description {
            if description.is_empty() {
                lines.push("- Description: (cleared)".to_string());
            } else {
                lines.push(format!("- Description: {}", description));
            }
        }
        if let Some(public) = update.public {
            lines.push(format!(
                "- Visibility: {}",
                if public { "Public" } else { "Private" }
            ));
        }
        if let Some(collaborative) = update.collaborative {
            lines.push(format!("- Collaborative: {}", yes_no(collaborative)));
        }
        lines.join("\n")
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: Arc<dyn SpotifyApi>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: UpdatePlaylistParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, api.as_ref()).await;
        Ok(super::common::to_http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UpdatePlaylistParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Update Playlist".into()),
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(api: Arc<dyn SpotifyApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let api = api.clone();
            async move {
                let params: UpdatePlaylistParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}
