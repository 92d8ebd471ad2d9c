use crate::{history, songs};
use async_trait::async_trait;
use melodia_core::{
    error::{MelodiaError, Result},
    storage::HistoryStore,
    types::*,
    RecencyList,
};
use sqlx::SqlitePool;

/// Play history store backed by `SQLite`
///
/// Writers open their transaction with a write statement so that the
/// `SQLite` write lock is taken before anything is read. Concurrent writers
/// then queue on the busy timeout instead of failing on a stale snapshot.
#[derive(Clone)]
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn get(&self, listener: &ListenerId) -> Result<RecencyList> {
        let mut conn = self.pool.acquire().await?;
        Ok(history::load(&mut conn, listener).await?.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    async fn append(&self, listener: &ListenerId, song: &SongId) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let touched =
            sqlx::query("UPDATE listeners SET last_played_at = datetime('now') WHERE id = ?")
                .bind(listener)
                .execute(&mut *tx)
                .await?;

        if touched.rows_affected() == 0 {
            return Err(MelodiaError::ListenerNotFound(listener.clone()));
        }

        if !songs::exists(&mut *tx, song).await? {
            return Err(MelodiaError::SongNotFound(song.clone()));
        }

        history::ensure(&mut tx, listener).await?;
        let mut list = history::load(&mut tx, listener).await?.unwrap_or_default();

        let replay = list.append(song.clone());
        history::persist(&mut tx, listener, &list).await?;

        tx.commit().await?;

        tracing::debug!(
            "Recorded play of {} for {} (replay: {}, history size: {})",
            song,
            listener,
            replay,
            list.len()
        );

        Ok(())
    }

    async fn remove(&self, listener: &ListenerId, song: &SongId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let touched =
            sqlx::query("UPDATE histories SET updated_at = updated_at WHERE listener_id = ?")
                .bind(listener)
                .execute(&mut *tx)
                .await?;

        if touched.rows_affected() == 0 {
            return Ok(false);
        }

        let Some(mut list) = history::load(&mut tx, listener).await? else {
            return Ok(false);
        };

        if !list.remove(song) {
            return Ok(false);
        }

        history::persist(&mut tx, listener, &list).await?;
        tx.commit().await?;

        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    async fn remove_everywhere(&self, song: &SongId) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE histories SET updated_at = updated_at
             WHERE listener_id IN (SELECT listener_id FROM history_songs WHERE song_id = ?)",
        )
        .bind(song)
        .execute(&mut *tx)
        .await?;

        let affected = history::remove_everywhere(&mut tx, song).await?;
        tx.commit().await?;

        tracing::debug!("Removed {} from {} histories", song, affected);

        Ok(affected)
    }

    #[tracing::instrument(skip(self))]
    async fn clear(&self, listener: &ListenerId) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let touched =
            sqlx::query("UPDATE histories SET updated_at = updated_at WHERE listener_id = ?")
                .bind(listener)
                .execute(&mut *tx)
                .await?;

        // No history yet; clearing must not create one
        if touched.rows_affected() == 0 {
            return Ok(());
        }

        history::persist(&mut tx, listener, &RecencyList::new()).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn summary(&self, listener: &ListenerId) -> Result<HistorySummary> {
        let mut conn = self.pool.acquire().await?;
        Ok(history::summary(&mut conn, listener).await?)
    }
}
