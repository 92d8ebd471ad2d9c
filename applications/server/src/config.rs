/// Operator configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MelodiaConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_blob")]
    pub blob: BlobSettings,

    #[serde(default = "default_history")]
    pub history: HistorySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobSettings {
    #[serde(default = "default_backend")]
    pub backend: BlobBackend,

    /// Base directory for the `local` backend
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,

    /// Project URL for the `supabase` backend, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub supabase_url: Option<String>,

    #[serde(default)]
    pub supabase_service_role_key: Option<String>,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_delete_timeout_secs")]
    pub delete_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackend {
    Local,
    Supabase,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistorySettings {
    /// Default number of entries printed by `history`
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl BlobSettings {
    pub fn delete_timeout(&self) -> Duration {
        Duration::from_secs(self.delete_timeout_secs)
    }
}

impl MelodiaConfig {
    /// Load configuration from file and environment
    ///
    /// Without an explicit path, `config.toml` in the working directory is
    /// read if it exists. Environment variables prefixed with `MELODIA_`
    /// override file values; nested keys use a double underscore
    /// (`MELODIA_BLOB__BACKEND=supabase`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MELODIA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set MELODIA_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.blob.delete_timeout_secs == 0 {
            return Err(ServerError::Config(
                "blob.delete_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.blob.backend == BlobBackend::Supabase {
            let raw_url = self.blob.supabase_url.as_deref().unwrap_or_default();
            if raw_url.is_empty() {
                return Err(ServerError::Config(
                    "Supabase URL is required (set MELODIA_BLOB__SUPABASE_URL)".to_string(),
                ));
            }

            let parsed = url::Url::parse(raw_url)
                .map_err(|e| ServerError::Config(format!("Invalid Supabase URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ServerError::Config(format!(
                    "Supabase URL must be http or https, got {}",
                    parsed.scheme()
                )));
            }

            if self
                .blob
                .supabase_service_role_key
                .as_deref()
                .unwrap_or_default()
                .is_empty()
            {
                return Err(ServerError::Config(
                    "Supabase service role key is required \
                     (set MELODIA_BLOB__SUPABASE_SERVICE_ROLE_KEY)"
                        .to_string(),
                ));
            }

            if self.blob.bucket.is_empty() {
                return Err(ServerError::Config("Blob bucket cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/melodia.db".to_string()
}

fn default_blob() -> BlobSettings {
    BlobSettings {
        backend: default_backend(),
        local_path: default_local_path(),
        supabase_url: None,
        supabase_service_role_key: None,
        bucket: default_bucket(),
        delete_timeout_secs: default_delete_timeout_secs(),
    }
}

fn default_backend() -> BlobBackend {
    BlobBackend::Local
}

fn default_local_path() -> PathBuf {
    PathBuf::from("./data/songs")
}

fn default_bucket() -> String {
    "songs".to_string()
}

fn default_delete_timeout_secs() -> u64 {
    melodia_storage::DEFAULT_BLOB_DELETE_TIMEOUT.as_secs()
}

fn default_history() -> HistorySettings {
    HistorySettings {
        recent_limit: default_recent_limit(),
    }
}

fn default_recent_limit() -> usize {
    20
}

impl Default for MelodiaConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            blob: default_blob(),
            history: default_history(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MelodiaConfig::default();
        assert_eq!(config.blob.backend, BlobBackend::Local);
        assert_eq!(config.blob.bucket, "songs");
        assert_eq!(config.blob.delete_timeout(), Duration::from_secs(10));
        config.validate().unwrap();
    }

    #[test]
    fn supabase_requires_url_and_key() {
        let mut config = MelodiaConfig::default();
        config.blob.backend = BlobBackend::Supabase;
        assert!(config.validate().is_err());

        config.blob.supabase_url = Some("https://project.supabase.co".to_string());
        assert!(config.validate().is_err());

        config.blob.supabase_service_role_key = Some("service-key".to_string());
        config.validate().unwrap();
    }

    #[test]
    fn rejects_non_http_supabase_url() {
        let mut config = MelodiaConfig::default();
        config.blob.backend = BlobBackend::Supabase;
        config.blob.supabase_url = Some("ftp://project.supabase.co".to_string());
        config.blob.supabase_service_role_key = Some("service-key".to_string());

        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = MelodiaConfig::default();
        config.blob.delete_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
