use crate::membership::PLAYLISTS;
use melodia_core::{error::Result, types::*};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn map_row(row: &SqliteRow) -> Playlist {
    Playlist {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, owner_id, created_at, updated_at
        FROM playlists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(map_row))
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    if playlist.name.trim().is_empty() {
        return Err(melodia_core::MelodiaError::invalid_input(
            "Playlist name cannot be empty",
        ));
    }

    let id = PlaylistId::generate();

    sqlx::query(
        r#"
        INSERT INTO playlists (id, name, description, owner_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&playlist.name)
    .bind(&playlist.description)
    .bind(&playlist.owner_id)
    .execute(pool)
    .await?;

    get_by_id(pool, &id).await?.ok_or_else(|| {
        melodia_core::MelodiaError::persistence("Failed to retrieve created playlist")
    })
}

/// Append a song to the end of a playlist; adding it twice is a no-op
pub async fn add_song(pool: &SqlitePool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
    let mut tx = pool.begin().await?;
    PLAYLISTS
        .attach(&mut tx, playlist_id.as_str(), song_id)
        .await?;
    tx.commit().await?;

    Ok(())
}

/// Song ids in playlist order
pub async fn song_ids(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<SongId>> {
    let mut conn = pool.acquire().await?;
    Ok(PLAYLISTS.song_ids(&mut conn, playlist_id.as_str()).await?)
}
