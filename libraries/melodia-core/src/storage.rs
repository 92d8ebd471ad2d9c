//! Store traits consumed by the catalog core
//!
//! The SQLite implementations live in `melodia-storage`; blob store adapters
//! live in the server application.

use crate::error::Result;
use crate::recency::RecencyList;
use crate::types::{HistorySummary, ListenerId, SongId};
use async_trait::async_trait;

/// Persistent per-listener play histories
///
/// Every listener owns at most one [`RecencyList`]. A listener that never
/// played anything and a listener whose history was cleared both read back
/// as an empty list; only [`HistoryStore::summary`] tells them apart.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Get the listener's history (empty when none exists yet)
    async fn get(&self, listener: &ListenerId) -> Result<RecencyList>;

    /// Record a play: load or create the history, move `song` to the front, persist
    ///
    /// # Errors
    ///
    /// `SongNotFound` if the song does not exist, `ListenerNotFound` if the
    /// listener account does not exist.
    async fn append(&self, listener: &ListenerId, song: &SongId) -> Result<()>;

    /// Remove one song from one listener's history
    ///
    /// Returns `false` (not an error) when the song was not in the history.
    async fn remove(&self, listener: &ListenerId, song: &SongId) -> Result<bool>;

    /// Remove `song` from every listener's history
    ///
    /// Scans all histories and persists only the ones that changed.
    /// Returns how many histories were touched.
    async fn remove_everywhere(&self, song: &SongId) -> Result<usize>;

    /// Empty the listener's history; succeeds when none exists
    async fn clear(&self, listener: &ListenerId) -> Result<()>;

    /// Existence flag and size of the listener's history
    async fn summary(&self, listener: &ListenerId) -> Result<HistorySummary>;

    /// The `limit` most recently played songs
    async fn recent(&self, listener: &ListenerId, limit: usize) -> Result<Vec<SongId>> {
        Ok(self.get(listener).await?.recent(limit))
    }

    /// Whether the listener has `song` in their history
    async fn has_played(&self, listener: &ListenerId, song: &SongId) -> Result<bool> {
        Ok(self.get(listener).await?.contains(song))
    }
}

/// Remote storage of audio payloads
///
/// Deletion is best-effort from the catalog's point of view: callers log
/// failures and carry on.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Delete the object at `path`
    ///
    /// Deleting an object that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// `StorageDeleteFailed` on network or storage errors, `InvalidInput`
    /// for an empty path.
    async fn delete(&self, path: &str) -> Result<()>;
}
