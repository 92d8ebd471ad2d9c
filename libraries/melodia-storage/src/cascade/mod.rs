//! Song deletion cascade
//!
//! Removing a song from the catalog touches every structure that can hold
//! it. The database side (histories, playlists, albums, the song row) runs
//! in one transaction; the audio payload is deleted from the blob store only
//! after that transaction commits, and a blob failure never undoes it.

use crate::{history, songs, ALBUMS, PLAYLISTS};
use melodia_core::{
    error::{MelodiaError, Result},
    storage::BlobStore,
    types::SongId,
};
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a single blob delete
pub const DEFAULT_BLOB_DELETE_TIMEOUT: Duration = Duration::from_secs(10);

/// What a successful cascade touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CascadeReport {
    /// Listener histories the song was removed from
    pub affected_histories: usize,
    /// Playlists the song was detached from
    pub affected_playlists: usize,
    /// Albums the song was detached from
    pub affected_albums: usize,
    /// Whether the blob store confirmed the payload is gone
    pub blob_deleted: bool,
}

/// Removes a song and every reference to it
pub struct SongDeletionCoordinator {
    pool: SqlitePool,
    blob_store: Arc<dyn BlobStore>,
    blob_timeout: Duration,
}

impl SongDeletionCoordinator {
    pub fn new(pool: SqlitePool, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            pool,
            blob_store,
            blob_timeout: DEFAULT_BLOB_DELETE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_blob_timeout(mut self, timeout: Duration) -> Self {
        self.blob_timeout = timeout;
        self
    }

    /// Delete `song_id` from histories, playlists, albums and the catalog,
    /// then remove its audio payload
    ///
    /// # Errors
    ///
    /// `SongNotFound` if no such song exists (nothing is changed), or
    /// `Persistence` if any database step fails (everything is rolled back).
    /// Blob store failures are logged and reported through
    /// [`CascadeReport::blob_deleted`].
    #[tracing::instrument(skip(self))]
    pub async fn delete_song_cascade(&self, song_id: &SongId) -> Result<CascadeReport> {
        let mut tx = self.pool.begin().await?;

        // Touch the row first so the write lock is held for the whole cascade
        let touched = sqlx::query("UPDATE songs SET title = title WHERE id = ?")
            .bind(song_id)
            .execute(&mut *tx)
            .await?;

        if touched.rows_affected() == 0 {
            return Err(MelodiaError::SongNotFound(song_id.clone()));
        }

        let song = songs::get_by_id(&mut *tx, song_id)
            .await?
            .ok_or_else(|| MelodiaError::SongNotFound(song_id.clone()))?;

        let affected_histories = history::remove_everywhere(&mut tx, song_id).await?;

        let playlists = PLAYLISTS
            .find_containers_referencing(&mut tx, song_id)
            .await?;
        let affected_playlists = PLAYLISTS.detach(&mut tx, &playlists, song_id).await?;

        let albums = ALBUMS.find_containers_referencing(&mut tx, song_id).await?;
        let affected_albums = ALBUMS.detach(&mut tx, &albums, song_id).await?;

        if !songs::delete_row(&mut *tx, song_id).await? {
            return Err(MelodiaError::SongNotFound(song_id.clone()));
        }

        tx.commit().await?;

        tracing::info!(
            "Deleted song {} ('{}'): {} histories, {} playlists, {} albums",
            song.id,
            song.title,
            affected_histories,
            affected_playlists,
            affected_albums
        );

        let blob_deleted = self.delete_blob(&song.file_path).await;

        Ok(CascadeReport {
            affected_histories,
            affected_playlists,
            affected_albums,
            blob_deleted,
        })
    }

    async fn delete_blob(&self, path: &str) -> bool {
        match tokio::time::timeout(self.blob_timeout, self.blob_store.delete(path)).await {
            Ok(Ok(())) => {
                tracing::debug!("Deleted blob {}", path);
                true
            }
            Ok(Err(e)) => {
                tracing::warn!("Blob delete failed for {}: {}", path, e);
                false
            }
            Err(_) => {
                tracing::warn!(
                    "Blob delete for {} timed out after {:?}",
                    path,
                    self.blob_timeout
                );
                false
            }
        }
    }
}
