//! Melodia Storage
//!
//! `SQLite` persistence for the Melodia catalog core.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries (`songs`,
//!   `listeners`, `history`, `playlists`, `albums`)
//! - **Membership Stores**: playlists and albums share one
//!   find-holders/detach shape (`membership`)
//! - **Cascade**: the song deletion coordinator fans removal out across
//!   histories, playlists and albums in one transaction (`cascade`)
//!
//! Slice functions that take a `&mut SqliteConnection` run on whatever
//! transaction the caller opened, so several slices can share one commit.
//!
//! # Example
//!
//! ```rust,no_run
//! use melodia_storage::{create_pool, run_migrations, SqliteHistoryStore};
//! use melodia_core::{HistoryStore, ListenerId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://melodia.db").await?;
//! run_migrations(&pool).await?;
//!
//! let history = SqliteHistoryStore::new(pool);
//! let recent = history.recent(&ListenerId::new("listener-1"), 10).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod albums;
pub mod history;
pub mod listeners;
pub mod playlists;
pub mod songs;

// Cross-slice cleanup
pub mod cascade;
pub mod membership;

pub use cascade::{CascadeReport, SongDeletionCoordinator, DEFAULT_BLOB_DELETE_TIMEOUT};
pub use context::SqliteHistoryStore;
pub use error::StorageError;
pub use membership::{MembershipStore, ALBUMS, PLAYLISTS};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://melodia.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal) // Readers don't block the writer
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30)); // Queue writers instead of failing

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("SQLite pool ready");

    Ok(pool)
}
