/// Shared application state
use crate::config::{BlobBackend, BlobSettings, MelodiaConfig};
use crate::error::{Result, ServerError};
use crate::services::{LocalBlobStore, SupabaseBlobStore};
use melodia_core::BlobStore;
use melodia_storage::{SongDeletionCoordinator, SqliteHistoryStore};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Everything a command needs, wired from configuration
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub history: Arc<SqliteHistoryStore>,
    pub coordinator: Arc<SongDeletionCoordinator>,
    pub config: Arc<MelodiaConfig>,
}

impl AppState {
    /// Connect to the database, apply migrations and build the services
    pub async fn connect(config: MelodiaConfig) -> Result<Self> {
        config.validate()?;

        let pool = melodia_storage::create_pool(&config.storage.database_url).await?;
        melodia_storage::run_migrations(&pool).await?;
        tracing::info!("Database connected");

        let blob_store = build_blob_store(&config.blob).await?;

        Ok(Self::new(pool, blob_store, config))
    }

    pub fn new(pool: SqlitePool, blob_store: Arc<dyn BlobStore>, config: MelodiaConfig) -> Self {
        let history = Arc::new(SqliteHistoryStore::new(pool.clone()));
        let coordinator = Arc::new(
            SongDeletionCoordinator::new(pool.clone(), blob_store)
                .with_blob_timeout(config.blob.delete_timeout()),
        );

        Self {
            pool,
            history,
            coordinator,
            config: Arc::new(config),
        }
    }
}

/// Build the configured blob store backend
pub async fn build_blob_store(settings: &BlobSettings) -> Result<Arc<dyn BlobStore>> {
    match settings.backend {
        BlobBackend::Local => {
            let store = LocalBlobStore::new(settings.local_path.clone());
            store.initialize().await?;
            tracing::info!("Local blob store at {:?}", settings.local_path);
            Ok(Arc::new(store))
        }
        BlobBackend::Supabase => {
            let url = settings
                .supabase_url
                .clone()
                .ok_or_else(|| ServerError::Config("Supabase URL is missing".to_string()))?;
            let key = settings.supabase_service_role_key.clone().ok_or_else(|| {
                ServerError::Config("Supabase service role key is missing".to_string())
            })?;

            let store = SupabaseBlobStore::new(url, settings.bucket.clone(), key)?;
            tracing::info!("Supabase blob store, bucket '{}'", settings.bucket);
            Ok(Arc::new(store))
        }
    }
}
