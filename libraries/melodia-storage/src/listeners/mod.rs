//! Listener accounts
//!
//! Account management proper is an external concern. The core needs to
//! create listeners, look them up, and delete them together with their
//! play history.

use crate::{history, StorageError};
use melodia_core::types::{CreateListener, Listener, ListenerId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

type Result<T> = std::result::Result<T, StorageError>;

fn map_row(row: &SqliteRow) -> Listener {
    Listener {
        id: row.get("id"),
        username: row.get("username"),
        created_at: row.get("created_at"),
        last_played_at: row.get("last_played_at"),
    }
}

/// Create a listener account
///
/// # Errors
///
/// Returns `StorageError::Duplicate` if the username is taken
pub async fn create(pool: &SqlitePool, listener: CreateListener) -> Result<Listener> {
    let id = ListenerId::generate();

    let result = sqlx::query("INSERT INTO listeners (id, username) VALUES (?, ?)")
        .bind(&id)
        .bind(&listener.username)
        .execute(pool)
        .await;

    match result {
        Ok(_) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(StorageError::Duplicate(format!(
                "username '{}' already exists",
                listener.username
            )));
        }
        Err(e) => return Err(e.into()),
    }

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| StorageError::not_found("Listener", id.as_str()))
}

pub async fn get_by_id(pool: &SqlitePool, id: &ListenerId) -> Result<Option<Listener>> {
    let row = sqlx::query(
        "SELECT id, username, created_at, last_played_at FROM listeners WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(map_row))
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<Listener>> {
    let row = sqlx::query(
        "SELECT id, username, created_at, last_played_at FROM listeners WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(map_row))
}

/// Delete a listener and destroy their play history
///
/// Playlists owned by the listener are not touched here. While any exist
/// the owner foreign key rejects the delete and nothing is removed.
pub async fn delete(pool: &SqlitePool, id: &ListenerId) -> Result<()> {
    let mut tx = pool.begin().await?;

    history::destroy(&mut tx, id).await?;

    let result = sqlx::query("DELETE FROM listeners WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Listener", id.as_str()));
    }

    tx.commit().await?;

    Ok(())
}
