//! Domains module containing business logic organized by bounded contexts.
//!
//! - **spotify**: the Spotify Web API seam (trait, client, wire model)
//! - **tools**: the MCP tools built on top of it

pub mod spotify;
pub mod tools;
