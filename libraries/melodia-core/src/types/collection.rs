//! Playlist and album types
//!
//! Both are containers of song memberships. Position matters to listeners;
//! catalog cleanup only cares about set membership.

use super::ids::{AlbumId, ListenerId, PlaylistId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A listener-owned playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: ListenerId,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: ListenerId,
}

/// An album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist_name: Option<String>, // Denormalized
    pub release_year: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub title: String,
    pub artist_name: Option<String>,
    pub release_year: Option<i32>,
}

/// Kind of song container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Playlist,
    Album,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Playlist => write!(f, "playlist"),
            ContainerKind::Album => write!(f, "album"),
        }
    }
}

/// A container found to reference a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRef {
    pub kind: ContainerKind,
    pub id: String,
    /// Playlist name or album title
    pub label: String,
}
