//! Common utilities shared across playlist tools.
//!
//! Reference parsing, result construction and text formatting helpers.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::warn;

use crate::domains::spotify::model::PlaylistTrackItem;
use crate::domains::spotify::{SpotifyIdKind, parse_id, track_uri};
use crate::domains::tools::ToolError;

/// Maximum number of tracks a single add/remove request may carry.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Maximum page size accepted by the playlist items endpoint.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Reduce a playlist reference (ID, URI or URL) to its bare ID.
pub fn parse_playlist_id(reference: &str) -> Result<String, ToolError> {
    Ok(parse_id(reference, SpotifyIdKind::Playlist)?)
}

/// Turn track references into `spotify:track:` URIs.
///
/// With `dedupe` set, repeated references keep only their first occurrence.
pub fn parse_track_uris(references: &[String], dedupe: bool) -> Result<Vec<String>, ToolError> {
    if references.is_empty() {
        return Err(ToolError::invalid_arguments(
            "track_ids must contain at least one track",
        ));
    }
    if references.len() > MAX_TRACKS_PER_REQUEST {
        return Err(ToolError::invalid_arguments(format!(
            "track_ids accepts at most {} tracks per call, got {}",
            MAX_TRACKS_PER_REQUEST,
            references.len()
        )));
    }

    let mut uris = Vec::with_capacity(references.len());
    for reference in references {
        let uri = track_uri(&parse_id(reference, SpotifyIdKind::Track)?);
        if dedupe && uris.contains(&uri) {
            continue;
        }
        uris.push(uri);
    }
    Ok(uris)
}

/// Clamp a page size to 1..=max.
pub fn clamp_limit(limit: u32, max: u32) -> u32 {
    limit.clamp(1, max)
}

/// Format a duration in milliseconds to M:SS format.
pub fn format_duration(length_ms: u64) -> String {
    let duration_secs = length_ms / 1000;
    let minutes = duration_secs / 60;
    let seconds = duration_secs % 60;
    format!("{}:{:02}", minutes, seconds)
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Spotify returns playlist descriptions with HTML entities escaped.
pub fn decode_html_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&#x2F;", "/")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// One numbered line of a track listing. `position` is 1-based.
pub fn format_track_line(position: u32, item: &PlaylistTrackItem) -> String {
    let Some(track) = &item.track else {
        return format!("{position}. [unavailable track]");
    };

    let mut line = format!(
        "{position}. {} by {} ({})",
        track.name,
        track.artist_names(),
        format_duration(track.duration_ms)
    );
    if track.is_local {
        line.push_str(" [local file]");
    }
    if let Some(added_at) = item.added_at {
        line.push_str(&format!(" - added {}", added_at.format("%Y-%m-%d")));
    }
    line
}

/// Structured view of one playlist entry.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct TrackSummary {
    /// 0-based position in the playlist.
    pub position: u32,
    pub name: Option<String>,
    pub artists: Option<String>,
    pub uri: Option<String>,
    pub duration: Option<String>,
    pub added_at: Option<String>,
}

impl TrackSummary {
    pub fn from_item(position: u32, item: &PlaylistTrackItem) -> Self {
        let track = item.track.as_ref();
        Self {
            position,
            name: track.map(|t| t.name.clone()),
            artists: track.map(|t| t.artist_names()),
            uri: track.map(|t| t.uri.clone()),
            duration: track.map(|t| format_duration(t.duration_ms)),
            added_at: item.added_at.map(|d| d.to_rfc3339()),
        }
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Render a tool failure. Remote failures are prefixed with the action.
pub fn failure_result(action: &str, err: &ToolError) -> CallToolResult {
    match err {
        ToolError::ExecutionFailed(e) => error_result(&format!("Failed to {action}: {e}")),
        other => error_result(&other.to_string()),
    }
}

/// Create a success result with a text summary and structured content.
pub fn structured_result<T: Serialize>(summary: String, data: T) -> CallToolResult {
    match serde_json::to_value(&data) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => {
            warn!("Failed to serialize structured content: {}", e);
            CallToolResult::success(vec![Content::text(summary)])
        }
    }
}

/// Shape a tool result as the JSON body returned by the HTTP transport.
#[cfg(feature = "http")]
pub fn to_http_response(result: CallToolResult) -> serde_json::Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });

    if let (Some(structured), Some(obj)) = (result.structured_content, response.as_object_mut()) {
        obj.insert("structuredContent".to_string(), structured);
    }

    response
}

/// Deserialize HTTP tool arguments into a params struct.
#[cfg(feature = "http")]
pub fn parse_http_params<P: serde::de::DeserializeOwned>(
    arguments: serde_json::Value,
) -> Result<P, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Extract the text of the first content item.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::spotify::mock::sample_track;

    #[test]
    fn test_parse_track_uris_dedupes() {
        let refs = vec![
            "t1".to_string(),
            "spotify:track:t1".to_string(),
            "https://open.spotify.com/track/t2".to_string(),
        ];
        let uris = parse_track_uris(&refs, true).unwrap();
        assert_eq!(uris, vec!["spotify:track:t1", "spotify:track:t2"]);

        let uris = parse_track_uris(&refs, false).unwrap();
        assert_eq!(uris.len(), 3);
    }

    #[test]
    fn test_parse_track_uris_limits() {
        assert!(matches!(
            parse_track_uris(&[], true),
            Err(ToolError::InvalidArguments(_))
        ));

        let too_many: Vec<String> = (0..101).map(|i| format!("t{i}")).collect();
        let err = parse_track_uris(&too_many, false).unwrap_err();
        assert!(err.to_string().contains("at most 100"));
    }

    #[test]
    fn test_parse_track_uris_rejects_playlist_reference() {
        let refs = vec!["spotify:playlist:abc".to_string()];
        assert!(matches!(
            parse_track_uris(&refs, true),
            Err(ToolError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(180000), "3:00");
        assert_eq!(format_duration(245000), "4:05");
        assert_eq!(format_duration(59000), "0:59");
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0, MAX_PAGE_SIZE), 1);
        assert_eq!(clamp_limit(20, MAX_PAGE_SIZE), 20);
        assert_eq!(clamp_limit(500, MAX_PAGE_SIZE), 50);
    }

    #[test]
    fn test_decode_html_entities() {
        assert_eq!(
            decode_html_entities("Rock &amp; Roll &#x27;70s &quot;best&quot;"),
            "Rock & Roll '70s \"best\""
        );
        assert_eq!(decode_html_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_format_track_line() {
        let item = PlaylistTrackItem {
            added_at: Some("2024-03-01T12:00:00Z".parse().unwrap()),
            track: Some(sample_track("t1", "Intro", "The Openers", 185_000)),
        };
        assert_eq!(
            format_track_line(1, &item),
            "1. Intro by The Openers (3:05) - added 2024-03-01"
        );

        let gone = PlaylistTrackItem {
            added_at: None,
            track: None,
        };
        assert_eq!(format_track_line(7, &gone), "7. [unavailable track]");
    }
}
