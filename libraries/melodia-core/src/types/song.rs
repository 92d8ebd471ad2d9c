//! Song types
//!
//! A song is referenced by id only from histories, playlists and albums;
//! it carries no back-pointers to the containers that hold it.

use super::ids::SongId;
use serde::{Deserialize, Serialize};

/// A song in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist_name: String, // Denormalized
    pub duration_seconds: i64,
    pub release_year: i32,
    /// Object path of the audio payload in the blob store
    pub file_path: String,
    pub uploaded_at: String,
}

/// Data for creating a new song
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSong {
    pub title: String,
    pub artist_name: String,
    pub duration_seconds: i64,
    pub release_year: i32,
    pub file_path: String,
}
