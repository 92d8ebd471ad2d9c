/// Local blob store - audio payloads as files under one directory
use async_trait::async_trait;
use melodia_core::{BlobStore, MelodiaError, Result};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Create the base directory if needed
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Store a payload at `relative` (used by fixtures and imports)
    pub async fn put(&self, relative: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.base_path.join(checked_relative(relative)?);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        self.validate_path(&path)?;

        fs::write(&path, data).await?;
        Ok(path)
    }

    /// Validate that a path is within the storage directory (prevent directory traversal)
    pub fn validate_path(&self, path: &Path) -> Result<()> {
        let canonical_base = self
            .base_path
            .canonicalize()
            .map_err(|e| MelodiaError::invalid_input(format!("Invalid base path: {e}")))?;

        // The file itself may not exist yet; its directory must
        let canonical_path = match path.canonicalize() {
            Ok(p) => p,
            Err(_) => {
                let parent = path.parent().unwrap_or(path);
                let file_name = path.file_name().unwrap_or_default();
                parent
                    .canonicalize()
                    .map_err(|e| MelodiaError::invalid_input(format!("Invalid path: {e}")))?
                    .join(file_name)
            }
        };

        if !canonical_path.starts_with(&canonical_base) {
            return Err(MelodiaError::invalid_input("Path traversal attempt detected"));
        }

        Ok(())
    }
}

/// Reject empty, absolute and `..` paths before touching the filesystem
fn checked_relative(relative: &str) -> Result<&Path> {
    let rel = Path::new(relative);
    if relative.is_empty()
        || rel.is_absolute()
        || rel.components().any(|c| matches!(c, Component::ParentDir))
    {
        return Err(MelodiaError::invalid_input(format!(
            "Blob path must be relative: {relative:?}"
        )));
    }
    Ok(rel)
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn delete(&self, path: &str) -> Result<()> {
        let full_path = self.base_path.join(checked_relative(path)?);

        let exists = fs::try_exists(&full_path)
            .await
            .map_err(|e| MelodiaError::storage_delete_failed(path, e.to_string()))?;

        if !exists {
            tracing::warn!(
                "Blob {} not found under {:?}, treating as deleted",
                path,
                self.base_path
            );
            return Ok(());
        }

        // Catches symlinks pointing out of the base directory
        self.validate_path(&full_path)?;

        fs::remove_file(&full_path)
            .await
            .map_err(|e| MelodiaError::storage_delete_failed(path, e.to_string()))?;

        tracing::debug!("Removed blob {:?}", full_path);

        Ok(())
    }
}
