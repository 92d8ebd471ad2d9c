//! Melodia Core
//!
//! Domain types, the recency-ordered play history structure, store traits
//! and the shared error type for the Melodia catalog.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Listener`, `Playlist`, `Album` and their ids
//! - **Recency List**: deduplicated, most-recent-first play history
//! - **Store Traits**: `HistoryStore`, `BlobStore`
//! - **Error Handling**: Unified `MelodiaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use melodia_core::{RecencyList, SongId};
//!
//! let mut history = RecencyList::new();
//! history.append(SongId::new("song-a"));
//! history.append(SongId::new("song-b"));
//! history.append(SongId::new("song-a"));
//!
//! assert_eq!(history.to_vec(), vec![SongId::new("song-a"), SongId::new("song-b")]);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod recency;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{MelodiaError, Result};
pub use recency::RecencyList;
pub use storage::{BlobStore, HistoryStore};

pub use types::{
    Album, AlbumId, ContainerKind, ContainerRef, CreateAlbum, CreateListener, CreatePlaylist,
    CreateSong, HistorySummary, Listener, ListenerId, Playlist, PlaylistId, Song, SongId,
};
