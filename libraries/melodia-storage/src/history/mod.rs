//! Play history persistence
//!
//! A history is a `histories` row plus one `history_songs` row per song,
//! where `play_order` 0 is the most recent play. Every function here runs on
//! a caller-supplied connection so it can take part in a wider transaction.

use crate::error::Result;
use melodia_core::types::{HistorySummary, ListenerId, SongId};
use melodia_core::RecencyList;
use sqlx::{Row, SqliteConnection};

/// Whether the listener has a history row (possibly empty)
pub async fn exists(conn: &mut SqliteConnection, listener: &ListenerId) -> Result<bool> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM histories WHERE listener_id = ?) AS present",
    )
    .bind(listener)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.get::<i64, _>("present") != 0)
}

/// Load a listener's history, or `None` if they never had one
pub async fn load(
    conn: &mut SqliteConnection,
    listener: &ListenerId,
) -> Result<Option<RecencyList>> {
    if !exists(conn, listener).await? {
        return Ok(None);
    }

    let rows = sqlx::query(
        "SELECT song_id FROM history_songs
         WHERE listener_id = ?
         ORDER BY play_order ASC",
    )
    .bind(listener)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(
        rows.iter()
            .map(|row| row.get::<SongId, _>("song_id"))
            .collect(),
    ))
}

/// Create an empty history row unless one exists
pub async fn ensure(conn: &mut SqliteConnection, listener: &ListenerId) -> Result<()> {
    sqlx::query(
        "INSERT INTO histories (listener_id) VALUES (?)
         ON CONFLICT(listener_id) DO NOTHING",
    )
    .bind(listener)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Replace the stored song rows with `list`
///
/// Rows are dropped and re-inserted: shifting `play_order` in place would
/// collide with the `(listener_id, play_order)` unique constraint.
pub async fn persist(
    conn: &mut SqliteConnection,
    listener: &ListenerId,
    list: &RecencyList,
) -> Result<()> {
    sqlx::query("DELETE FROM history_songs WHERE listener_id = ?")
        .bind(listener)
        .execute(&mut *conn)
        .await?;

    for (order, song) in list.iter().enumerate() {
        sqlx::query(
            "INSERT INTO history_songs (listener_id, song_id, play_order) VALUES (?, ?, ?)",
        )
        .bind(listener)
        .bind(song)
        .bind(order as i64)
        .execute(&mut *conn)
        .await?;
    }

    sqlx::query("UPDATE histories SET updated_at = datetime('now') WHERE listener_id = ?")
        .bind(listener)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Drop `song` from every history that contains it
///
/// Returns the number of histories that changed. Unchanged histories are
/// not rewritten.
pub async fn remove_everywhere(conn: &mut SqliteConnection, song: &SongId) -> Result<usize> {
    let listeners: Vec<ListenerId> =
        sqlx::query("SELECT listener_id FROM histories ORDER BY listener_id")
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(|row| row.get("listener_id"))
            .collect();

    let mut affected = 0;
    for listener in &listeners {
        let Some(mut list) = load(conn, listener).await? else {
            continue;
        };

        if list.remove(song) {
            persist(conn, listener, &list).await?;
            affected += 1;
        }
    }

    Ok(affected)
}

/// Delete the listener's history entirely, including the history row
pub async fn destroy(conn: &mut SqliteConnection, listener: &ListenerId) -> Result<()> {
    sqlx::query("DELETE FROM history_songs WHERE listener_id = ?")
        .bind(listener)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM histories WHERE listener_id = ?")
        .bind(listener)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

pub async fn summary(conn: &mut SqliteConnection, listener: &ListenerId) -> Result<HistorySummary> {
    if !exists(conn, listener).await? {
        return Ok(HistorySummary::missing(listener.clone()));
    }

    let row = sqlx::query("SELECT COUNT(*) AS played FROM history_songs WHERE listener_id = ?")
        .bind(listener)
        .fetch_one(&mut *conn)
        .await?;

    Ok(HistorySummary {
        listener_id: listener.clone(),
        played_count: row.get::<i64, _>("played") as usize,
        exists: true,
    })
}
