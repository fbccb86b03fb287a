//! Spotify Playlist MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing tools that read and edit
//! Spotify playlists.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **spotify**: Web API client behind the `SpotifyApi` trait
//!   - **tools**: MCP tools (`get_playlist`, `update_playlist`, ...)
//!
//! # Example
//!
//! ```rust,no_run
//! use spotify_playlist_mcp::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let _server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use crate::core::{Config, Error, McpServer, Result};
