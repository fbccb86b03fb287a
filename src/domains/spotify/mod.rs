//! Spotify domain module.
//!
//! Everything the tools need from the Spotify Web API lives here:
//!
//! - `api.rs` - the `SpotifyApi` trait the tools call through
//! - `client.rs` - reqwest implementation of that trait
//! - `model.rs` - request and response shapes
//! - `ids.rs` - playlist/track reference normalisation
//! - `error.rs` - API error types

mod api;
mod client;
mod error;
pub mod ids;
pub mod model;

#[cfg(test)]
pub(crate) mod mock;

pub use api::SpotifyApi;
pub use client::SpotifyClient;
pub use error::{SpotifyError, SpotifyResult};
pub use ids::{IdError, SpotifyIdKind, parse_id, track_uri};
