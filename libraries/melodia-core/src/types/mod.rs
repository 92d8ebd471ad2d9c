mod collection;
mod history;
mod ids;
mod listener;
mod song;

pub use collection::{
    Album, ContainerKind, ContainerRef, CreateAlbum, CreatePlaylist, Playlist,
};
pub use history::HistorySummary;
pub use ids::{AlbumId, ListenerId, PlaylistId, SongId};
pub use listener::{CreateListener, Listener};
pub use song::{CreateSong, Song};
