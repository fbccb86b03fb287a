//! Get playlist tracks tool.
//!
//! Pages through a playlist's items, for playlists too long for `get_playlist`.

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

use super::common::{
    MAX_PAGE_SIZE, TrackSummary, clamp_limit, failure_result, format_track_line,
    parse_playlist_id, structured_result,
};
use crate::domains::spotify::SpotifyApi;
use crate::domains::spotify::model::{Page, PlaylistTrackItem};
use crate::domains::tools::ToolError;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPlaylistTracksParams {
    #[schemars(description = "Playlist ID, Spotify URI or open.spotify.com URL")]
    pub playlist_id: String,

    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of tracks to return (default: 20, max: 50)")]
    pub limit: u32,

    #[serde(default)]
    #[schemars(description = "0-based index of the first track to return (default: 0)")]
    pub offset: u32,
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PlaylistTracksPage {
    pub playlist_id: String,
    pub total: u32,
    pub offset: u32,
    pub tracks: Vec<TrackSummary>,
    pub next_offset: Option<u32>,
}

/// Get playlist tracks tool.
pub struct GetPlaylistTracksTool;

impl GetPlaylistTracksTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_playlist_tracks";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List the tracks of a Spotify playlist, one page at a time. \
         Use offset to page through long playlists.";

    #[instrument(skip_all, fields(playlist_id = %params.playlist_id))]
    pub async fn execute(params: &GetPlaylistTracksParams, api: &dyn SpotifyApi) -> CallToolResult {
        info!(
            "Get playlist tracks tool called for: {} (limit={}, offset={})",
            params.playlist_id, params.limit, params.offset
        );

        match Self::run(params, api).await {
            Ok(result) => result,
            Err(e) => failure_result("get playlist tracks", &e),
        }
    }

    async fn run(
        params: &GetPlaylistTracksParams,
        api: &dyn SpotifyApi,
    ) -> Result<CallToolResult, ToolError> {
        let playlist_id = parse_playlist_id(&params.playlist_id)?;
        let limit = clamp_limit(params.limit, MAX_PAGE_SIZE);

        let page = api
            .get_playlist_tracks(&playlist_id, limit, params.offset)
            .await?;

        let summary = Self::format_page(&playlist_id, &page);
        let next_offset = Self::next_offset(&page);
        let data = PlaylistTracksPage {
            playlist_id,
            total: page.total,
            offset: page.offset,
            tracks: page
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| TrackSummary::from_item(Self::position(&page, i), item))
                .collect(),
            next_offset,
        };
        Ok(structured_result(summary, data))
    }

    /// 0-based absolute position of the `index`-th item of a page.
    fn position(page: &Page<PlaylistTrackItem>, index: usize) -> u32 {
        page.offset.saturating_add(index as u32)
    }

    fn next_offset(page: &Page<PlaylistTrackItem>) -> Option<u32> {
        let end = Self::position(page, page.items.len());
        (!page.items.is_empty() && (page.next.is_some() || end < page.total)).then_some(end)
    }

    pub fn format_page(playlist_id: &str, page: &Page<PlaylistTrackItem>) -> String {
        if page.items.is_empty() {
            return format!(
                "No tracks found at offset {} (playlist has {} tracks).",
                page.offset, page.total
            );
        }

        let first = page.offset.saturating_add(1);
        let last = Self::position(page, page.items.len());
        let mut lines = vec![format!(
            "Tracks {}-{} of {} in playlist {}:",
            first, last, page.total, playlist_id
        )];
        for (i, item) in page.items.iter().enumerate() {
            let position = Self::position(page, i).saturating_add(1);
            lines.push(format_track_line(position, item));
        }
        if let Some(next) = Self::next_offset(page) {
            lines.push(format!("More tracks available: use offset {}.", next));
        }
        lines.join("\n")
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        api: Arc<dyn SpotifyApi>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: GetPlaylistTracksParams = super::common::parse_http_params(arguments)?;
        let result = Self::execute(&params, api.as_ref()).await;
        Ok(super::common::to_http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetPlaylistTracksParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Get Playlist Tracks".into()),
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
                let params: GetPlaylistTracksParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, api.as_ref()).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::spotify::mock::{MockSpotify, RecordedCall, sample_track};
    use crate::domains::tools::definitions::playlist::common::result_text;

    fn params(limit: u32, offset: u32) -> GetPlaylistTracksParams {
        GetPlaylistTracksParams {
            playlist_id: "pl1".to_string(),
            limit,
            offset,
        }
    }

    #[tokio::test]
    async fn test_first_page_with_more_available() {
        let api = MockSpotify::new();
        let result = GetPlaylistTracksTool::execute(&params(2, 0), &api).await;

        assert_eq!(
            result_text(&result),
            "Tracks 1-2 of 3 in playlist pl1:\n\
             1. Intro by The Openers (3:05)\n\
             2. Middle Eight by Bridge &amp; Co (1:01)\n\
             More tracks available: use offset 2."
        );
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["next_offset"], 2);
    }

    #[tokio::test]
    async fn test_last_page_uses_absolute_positions() {
        let api = MockSpotify::new();
        let result = GetPlaylistTracksTool::execute(&params(20, 2), &api).await;

        let text = result_text(&result);
        assert_eq!(text, "Tracks 3-3 of 3 in playlist pl1:\n3. [unavailable track]");
        assert!(result.structured_content.unwrap()["next_offset"].is_null());
    }

    #[tokio::test]
    async fn test_offset_past_end() {
        let api = MockSpotify::new();
        let result = GetPlaylistTracksTool::execute(&params(20, 10), &api).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result_text(&result),
            "No tracks found at offset 10 (playlist has 3 tracks)."
        );
    }

    #[tokio::test]
    async fn test_limit_is_clamped() {
        let api = MockSpotify::new();
        GetPlaylistTracksTool::execute(&params(500, 0), &api).await;

        assert_eq!(
            api.calls(),
            vec![RecordedCall::GetTracks {
                playlist_id: "pl1".to_string(),
                limit: 50,
                offset: 0,
            }]
        );
    }

    #[test]
    fn test_format_page_saturates_at_max_offset() {
        let page = Page {
            items: vec![PlaylistTrackItem {
                added_at: None,
                track: Some(sample_track("t1", "Intro", "The Openers", 185_000)),
            }],
            total: u32::MAX,
            limit: 1,
            offset: u32::MAX,
            next: None,
        };

        let text = GetPlaylistTracksTool::format_page("pl1", &page);
        assert_eq!(
            text,
            "Tracks 4294967295-4294967295 of 4294967295 in playlist pl1:\n\
             4294967295. Intro by The Openers (3:05)"
        );
        assert_eq!(GetPlaylistTracksTool::position(&page, 3), u32::MAX);
    }

    #[tokio::test]
    async fn test_missing_token_reported() {
        let api = MockSpotify::failing(401, "No token provided");
        let result = GetPlaylistTracksTool::execute(&params(20, 0), &api).await;
        assert!(result_text(&result).starts_with("Failed to get playlist tracks:"));
    }
}
