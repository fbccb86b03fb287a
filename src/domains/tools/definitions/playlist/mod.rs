//! Spotify playlist tools.
//!
//! - `get`: playlist metadata and an optional track listing
//! - `get_tracks`: paged track listing
//! - `update`: name, description, visibility and collaborative flag
//! - `add_tracks` / `remove_tracks` / `reorder_tracks`: item edits
//!
//! Each tool has handlers for both HTTP and STDIO transports.

pub mod add_tracks;
pub mod common;
pub mod get;
pub mod get_tracks;
pub mod remove_tracks;
pub mod reorder_tracks;
pub mod update;

pub use add_tracks::{AddTracksParams, AddTracksTool};
pub use get::{GetPlaylistParams, GetPlaylistTool};
pub use get_tracks::{GetPlaylistTracksParams, GetPlaylistTracksTool};
pub use remove_tracks::{RemoveTracksParams, RemoveTracksTool};
pub use reorder_tracks::{ReorderTracksParams, ReorderTracksTool};
pub use update::{UpdatePlaylistParams, UpdatePlaylistTool};
