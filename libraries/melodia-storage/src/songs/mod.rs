//! Canonical song records
//!
//! Catalog CRUD proper lives outside the core; this slice covers what the
//! history and cascade paths need.

use melodia_core::{error::Result, types::*};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Executor, Row, SqlitePool};

fn map_row(row: &SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        title: row.get("title"),
        artist_name: row.get("artist_name"),
        duration_seconds: row.get("duration_seconds"),
        release_year: row.get("release_year"),
        file_path: row.get("file_path"),
        uploaded_at: row.get("uploaded_at"),
    }
}

pub async fn get_by_id<'e, E>(executor: E, id: &SongId) -> Result<Option<Song>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(
        "SELECT id, title, artist_name, duration_seconds, release_year, file_path, uploaded_at
         FROM songs
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.as_ref().map(map_row))
}

pub async fn exists<'e, E>(executor: E, id: &SongId) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM songs WHERE id = ?) AS present")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(row.get::<i64, _>("present") != 0)
}

pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<Song> {
    if song.title.trim().is_empty() {
        return Err(melodia_core::MelodiaError::invalid_input("Song title cannot be empty"));
    }

    let id = SongId::generate();

    sqlx::query(
        "INSERT INTO songs (id, title, artist_name, duration_seconds, release_year, file_path)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&song.title)
    .bind(&song.artist_name)
    .bind(song.duration_seconds)
    .bind(song.release_year)
    .bind(&song.file_path)
    .execute(pool)
    .await?;

    get_by_id(pool, &id).await?.ok_or_else(|| {
        melodia_core::MelodiaError::persistence("Failed to retrieve created song")
    })
}

/// Delete the song row only.
///
/// References from histories, playlists and albums must already be gone;
/// the foreign keys reject the delete otherwise. Use
/// [`crate::SongDeletionCoordinator`] to remove a song from the catalog.
///
/// Returns `false` when no row matched.
pub async fn delete_row<'e, E>(executor: E, id: &SongId) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
