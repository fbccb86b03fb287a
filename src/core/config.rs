//! Configuration management for the MCP server.
//!
//! Configuration is populated from defaults, then overridden by environment
//! variables (optionally loaded from a `.env` file).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default base URL of the Spotify Web API.
pub const DEFAULT_SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Spotify Web API access.
    pub spotify: SpotifyConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Spotify Web API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// OAuth bearer token with the playlist-modify scopes.
    /// Obtaining and refreshing it is left to the caller.
    pub access_token: Option<String>,

    /// API base URL, overridable for proxies and tests.
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base_url: DEFAULT_SPOTIFY_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "spotify-playlist-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            spotify: SpotifyConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables, logging any problems.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). Spotify settings use the
    /// `SPOTIFY_` prefix. Warnings are emitted through `tracing`, so a
    /// subscriber must already be installed for them to be seen; see
    /// [`Config::load_env`] otherwise.
    pub fn from_env() -> Self {
        let (config, warnings) = Self::load_env();
        for warning in &warnings {
            warn!("{}", warning);
        }
        config
    }

    /// Load configuration from environment variables without logging.
    ///
    /// Returns the configuration together with the warnings found while
    /// reading it, for callers that set up logging from the loaded config.
    pub fn load_env() -> (Self, Vec<String>) {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        match std::env::var("SPOTIFY_ACCESS_TOKEN") {
            Ok(token) if !token.trim().is_empty() => {
                config.spotify.access_token = Some(token.trim().to_string());
            }
            _ => {
                warnings.push(
                    "SPOTIFY_ACCESS_TOKEN not set - every playlist tool call will fail \
                     until a token with playlist-read/modify scopes is provided"
                        .to_string(),
                );
            }
        }

        if let Ok(base_url) = std::env::var("SPOTIFY_API_BASE_URL") {
            config.spotify.api_base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("SPOTIFY_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.spotify.request_timeout_secs = secs,
                Err(_) => {
                    warnings.push(format!("Ignoring invalid SPOTIFY_TIMEOUT_SECS: {timeout}"));
                }
            }
        }

        (config, warnings)
    }
}
