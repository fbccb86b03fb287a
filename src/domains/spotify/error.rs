//! Spotify Web API error types.

use serde::Deserialize;
use thiserror::Error;

/// Result type for Spotify API operations.
pub type SpotifyResult<T> = Result<T, SpotifyError>;

/// Errors returned by the Spotify Web API or raised while talking to it.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// No access token has been configured.
    #[error("No Spotify access token configured (set SPOTIFY_ACCESS_TOKEN)")]
    MissingToken,

    /// The access token was rejected (expired or revoked).
    #[error("Spotify rejected the access token: {0}")]
    Unauthorized(String),

    /// The token lacks the scope or ownership required for the operation.
    #[error("Spotify denied access: {0}")]
    Forbidden(String),

    /// The playlist or track does not exist.
    #[error("Spotify resource not found: {0}")]
    NotFound(String),

    /// Too many requests. The service asks to wait `retry_after` seconds.
    #[error("Spotify rate limit exceeded{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<u64> },

    /// Any other non-success status.
    #[error("Spotify API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("Invalid response from Spotify: {0}")]
    Decode(String),
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(" (retry after {secs}s)"),
        None => String::new(),
    }
}

impl SpotifyError {
    /// Build an error from a non-success HTTP status and the service message.
    pub fn from_status(status: u16, message: impl Into<String>, retry_after: Option<u64>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited { retry_after },
            _ => Self::Api { status, message },
        }
    }
}

/// Error envelope used by the Web API: `{"error": {"status": 404, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            SpotifyError::from_status(401, "expired", None),
            SpotifyError::Unauthorized(_)
        ));
        assert!(matches!(
            SpotifyError::from_status(403, "nope", None),
            SpotifyError::Forbidden(_)
        ));
        assert!(matches!(
            SpotifyError::from_status(404, "missing", None),
            SpotifyError::NotFound(_)
        ));
        assert!(matches!(
            SpotifyError::from_status(502, "bad gateway", None),
            SpotifyError::Api { status: 502, .. }
        ));
    }

    #[test]
    fn test_rate_limited_message() {
        let err = SpotifyError::from_status(429, "slow down", Some(7));
        assert_eq!(err.to_string(), "Spotify rate limit exceeded (retry after 7s)");

        let err = SpotifyError::from_status(429, "slow down", None);
        assert_eq!(err.to_string(), "Spotify rate limit exceeded");
    }
}
