//! Song membership in playlists and albums
//!
//! Playlists and albums store memberships the same way: a container table
//! and a join table with a dense `position` column. [`MembershipStore`]
//! describes one such pair so the cascade can treat both uniformly.

use crate::error::Result;
use melodia_core::types::{ContainerKind, ContainerRef, SongId};
use sqlx::{Row, SqliteConnection};

/// Table layout of one container kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipStore {
    pub kind: ContainerKind,
    container_table: &'static str,
    join_table: &'static str,
    container_column: &'static str,
    label_column: &'static str,
}

/// Playlist memberships (`playlist_songs`)
pub const PLAYLISTS: MembershipStore = MembershipStore {
    kind: ContainerKind::Playlist,
    container_table: "playlists",
    join_table: "playlist_songs",
    container_column: "playlist_id",
    label_column: "name",
};

/// Album memberships (`album_songs`)
pub const ALBUMS: MembershipStore = MembershipStore {
    kind: ContainerKind::Album,
    container_table: "albums",
    join_table: "album_songs",
    container_column: "album_id",
    label_column: "title",
};

impl MembershipStore {
    /// Containers of this kind that hold `song`, ordered by id
    pub async fn find_containers_referencing(
        &self,
        conn: &mut SqliteConnection,
        song: &SongId,
    ) -> Result<Vec<ContainerRef>> {
        let sql = format!(
            "SELECT c.id AS id, c.{label} AS label
             FROM {container} c
             INNER JOIN {join} j ON j.{column} = c.id
             WHERE j.song_id = ?
             ORDER BY c.id",
            label = self.label_column,
            container = self.container_table,
            join = self.join_table,
            column = self.container_column,
        );

        let rows = sqlx::query(&sql).bind(song).fetch_all(&mut *conn).await?;

        Ok(rows
            .iter()
            .map(|row| ContainerRef {
                kind: self.kind,
                id: row.get("id"),
                label: row.get("label"),
            })
            .collect())
    }

    /// Remove `song` from each of `containers`
    ///
    /// Positions of the remaining songs are compacted and the container's
    /// `updated_at` is bumped. Containers of another kind, and containers
    /// that no longer hold the song, are skipped. Returns the number of
    /// memberships removed.
    pub async fn detach(
        &self,
        conn: &mut SqliteConnection,
        containers: &[ContainerRef],
        song: &SongId,
    ) -> Result<usize> {
        let delete_sql = format!(
            "DELETE FROM {join} WHERE {column} = ? AND song_id = ?",
            join = self.join_table,
            column = self.container_column,
        );

        // Renumber 0..n in existing order to fill the gap
        let compact_sql = format!(
            "UPDATE {join}
             SET position = (
                 SELECT COUNT(*)
                 FROM {join} j2
                 WHERE j2.{column} = {join}.{column}
                   AND j2.position < {join}.position
             )
             WHERE {column} = ?",
            join = self.join_table,
            column = self.container_column,
        );

        let touch_sql = format!(
            "UPDATE {container} SET updated_at = datetime('now') WHERE id = ?",
            container = self.container_table,
        );

        let mut detached = 0;
        for container in containers.iter().filter(|c| c.kind == self.kind) {
            let removed = sqlx::query(&delete_sql)
                .bind(&container.id)
                .bind(song)
                .execute(&mut *conn)
                .await?;

            if removed.rows_affected() == 0 {
                continue;
            }

            sqlx::query(&compact_sql)
                .bind(&container.id)
                .execute(&mut *conn)
                .await?;

            sqlx::query(&touch_sql)
                .bind(&container.id)
                .execute(&mut *conn)
                .await?;

            detached += 1;
        }

        Ok(detached)
    }

    /// Song ids in a container, in position order
    pub async fn song_ids(
        &self,
        conn: &mut SqliteConnection,
        container_id: &str,
    ) -> Result<Vec<SongId>> {
        let sql = format!(
            "SELECT song_id FROM {join} WHERE {column} = ? ORDER BY position",
            join = self.join_table,
            column = self.container_column,
        );

        let rows = sqlx::query(&sql)
            .bind(container_id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows.iter().map(|row| row.get("song_id")).collect())
    }

    /// Append `song` at the end of a container
    ///
    /// Adding a song that is already present is a no-op.
    pub async fn attach(
        &self,
        conn: &mut SqliteConnection,
        container_id: &str,
        song: &SongId,
    ) -> Result<()> {
        let sql = format!(
            "INSERT INTO {join} ({column}, song_id, position)
             SELECT ?, ?, COALESCE(MAX(position) + 1, 0)
             FROM {join} WHERE {column} = ?
             ON CONFLICT({column}, song_id) DO NOTHING",
            join = self.join_table,
            column = self.container_column,
        );

        sqlx::query(&sql)
            .bind(container_id)
            .bind(song)
            .bind(container_id)
            .execute(&mut *conn)
            .await?;

        let touch_sql = format!(
            "UPDATE {container} SET updated_at = datetime('now') WHERE id = ?",
            container = self.container_table,
        );

        sqlx::query(&touch_sql)
            .bind(container_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
