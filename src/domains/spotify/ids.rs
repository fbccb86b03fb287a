//! Spotify ID and URI normalisation.
//!
//! Agents hand us playlist and track references in whatever shape they found
//! them: bare base-62 IDs, `spotify:` URIs, or `open.spotify.com` links. Every
//! reference is reduced to a bare ID before it reaches the API client.

use reqwest::Url;
use thiserror::Error;

/// Hosts that serve shareable Spotify links.
const SPOTIFY_HOSTS: [&str; 2] = ["open.spotify.com", "play.spotify.com"];

/// The kind of Spotify object a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotifyIdKind {
    Playlist,
    Track,
}

impl SpotifyIdKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playlist => "playlist",
            Self::Track => "track",
        }
    }
}

/// Errors raised when a reference cannot be reduced to an ID.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("{0} ID must not be empty")]
    Empty(&'static str),

    #[error("expected a {expected} reference but got a {found} reference: {input}")]
    WrongKind {
        expected: &'static str,
        found: String,
        input: String,
    },

    #[error("not a valid Spotify {kind} reference: {input}")]
    Invalid { kind: &'static str, input: String },
}

/// Reduce a playlist or track reference to its bare ID.
pub fn parse_id(input: &str, kind: SpotifyIdKind) -> Result<String, IdError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(IdError::Empty(kind.as_str()));
    }

    let invalid = || IdError::Invalid {
        kind: kind.as_str(),
        input: input.to_string(),
    };

    let (found_kind, id) = if let Some(rest) = input.strip_prefix("spotify:") {
        // spotify:playlist:<id>, or the legacy spotify:user:<user>:playlist:<id>
        let segments: Vec<&str> = rest.split(':').collect();
        match segments.as_slice() {
            [.., k, id] => (Some(k.to_string()), id.to_string()),
            _ => return Err(invalid()),
        }
    } else if input.starts_with("http://") || input.starts_with("https://") {
        let url = Url::parse(input).map_err(|_| invalid())?;
        if !url
            .host_str()
            .is_some_and(|host| SPOTIFY_HOSTS.contains(&host))
        {
            return Err(invalid());
        }
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| {
                s.filter(|seg| !seg.is_empty() && !seg.starts_with("intl-"))
                    .collect()
            })
            .unwrap_or_default();
        match segments.as_slice() {
            [.., k, id] => (Some(k.to_string()), id.to_string()),
            _ => return Err(invalid()),
        }
    } else {
        (None, input.to_string())
    };

    if let Some(found) = found_kind {
        if found != kind.as_str() {
            return Err(IdError::WrongKind {
                expected: kind.as_str(),
                found,
                input: input.to_string(),
            });
        }
    }

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid());
    }

    Ok(id)
}

/// Build the `spotify:track:<id>` URI the playlist endpoints expect.
pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{track_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYLIST: &str = "37i9dQZF1DXcBWIGoYBM5M";

    #[test]
    fn test_bare_id() {
        assert_eq!(parse_id(PLAYLIST, SpotifyIdKind::Playlist).unwrap(), PLAYLIST);
        assert_eq!(
            parse_id("  4uLU6hMCjMI75M1A2tKUQC ", SpotifyIdKind::Track).unwrap(),
            "4uLU6hMCjMI75M1A2tKUQC"
        );
    }

    #[test]
    fn test_uri_forms() {
        assert_eq!(
            parse_id("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M", SpotifyIdKind::Playlist).unwrap(),
            PLAYLIST
        );
        assert_eq!(
            parse_id(
                "spotify:user:someone:playlist:37i9dQZF1DXcBWIGoYBM5M",
                SpotifyIdKind::Playlist
            )
            .unwrap(),
            PLAYLIST
        );
    }

    #[test]
    fn test_url_forms() {
        assert_eq!(
            parse_id(
                "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123",
                SpotifyIdKind::Playlist
            )
            .unwrap(),
            PLAYLIST
        );
        assert_eq!(
            parse_id(
                "https://open.spotify.com/intl-de/track/4uLU6hMCjMI75M1A2tKUQC",
                SpotifyIdKind::Track
            )
            .unwrap(),
            "4uLU6hMCjMI75M1A2tKUQC"
        );
    }

    #[test]
    fn test_wrong_kind() {
        let err = parse_id("spotify:track:4uLU6hMCjMI75M1A2tKUQC", SpotifyIdKind::Playlist)
            .unwrap_err();
        assert!(matches!(err, IdError::WrongKind { found, .. } if found == "track"));
    }

    #[test]
    fn test_invalid_references() {
        assert_eq!(
            parse_id("   ", SpotifyIdKind::Playlist),
            Err(IdError::Empty("playlist"))
        );
        assert!(matches!(
            parse_id("not/an-id", SpotifyIdKind::Playlist),
            Err(IdError::Invalid { .. })
        ));
        assert!(matches!(
            parse_id("https://example.com/playlist/abc", SpotifyIdKind::Playlist),
            Err(IdError::Invalid { .. })
        ));
        assert!(matches!(
            parse_id("spotify:", SpotifyIdKind::Playlist),
            Err(IdError::Invalid { .. })
        ));
    }

    #[test]
    fn test_track_uri() {
        assert_eq!(track_uri("abc"), "spotify:track:abc");
    }
}
