use crate::membership::ALBUMS;
use melodia_core::{error::Result, types::*};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn map_row(row: &SqliteRow) -> Album {
    Album {
        id: row.get("id"),
        title: row.get("title"),
        artist_name: row.get("artist_name"),
        release_year: row.get("release_year"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT id, title, artist_name, release_year, created_at, updated_at
         FROM albums
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(map_row))
}

pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    if album.title.trim().is_empty() {
        return Err(melodia_core::MelodiaError::invalid_input(
            "Album title cannot be empty",
        ));
    }

    let id = AlbumId::generate();

    sqlx::query("INSERT INTO albums (id, title, artist_name, release_year) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&album.title)
        .bind(&album.artist_name)
        .bind(album.release_year)
        .execute(pool)
        .await?;

    get_by_id(pool, &id).await?.ok_or_else(|| {
        melodia_core::MelodiaError::persistence("Failed to retrieve created album")
    })
}

/// Append a track to the album's running order; adding it twice is a no-op
pub async fn add_song(pool: &SqlitePool, album_id: &AlbumId, song_id: &SongId) -> Result<()> {
    let mut tx = pool.begin().await?;
    ALBUMS.attach(&mut tx, album_id.as_str(), song_id).await?;
    tx.commit().await?;

    Ok(())
}

/// Song ids in track order
pub async fn song_ids(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<SongId>> {
    let mut conn = pool.acquire().await?;
    Ok(ALBUMS.song_ids(&mut conn, album_id.as_str()).await?)
}
