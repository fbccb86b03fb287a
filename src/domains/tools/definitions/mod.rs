//! Tool definitions module.
//!
//! Each tool is defined in its own file under its domain folder.

pub mod playlist;

pub use playlist::{
    AddTracksParams, AddTracksTool, GetPlaylistParams, GetPlaylistTool, GetPlaylistTracksParams,
    GetPlaylistTracksTool, RemoveTracksParams, RemoveTracksTool, ReorderTracksParams,
    ReorderTracksTool, UpdatePlaylistParams, UpdatePlaylistTool,
};
