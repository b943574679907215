//! Durable favorites store backed by a JSON file
//!
//! The whole favorites set lives in one JSON array document. Each mutation
//! reads the document, changes it and rewrites it in full through a temporary
//! file that is renamed over the original, so a failed write never leaves a
//! truncated document behind.
//!
//! Read-modify-write cycles are serialized by an async mutex keyed by the
//! absolute document path, shared by every `FileFavoritesStore` in the process
//! that points at the same file.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex, OnceLock};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{FavoritesSet, FavoritesStore, PersistenceError};
use crate::config::StorageConfig;
use crate::data::Recipe;

/// Returns the write lock shared by all stores using `path`
///
/// Locks are never evicted; the registry holds one entry per distinct path
/// opened during the life of the process.
fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<StdMutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    locks.entry(key).or_default().clone()
}

/// Favorites store persisted as a single JSON document
#[derive(Debug, Clone)]
pub struct FileFavoritesStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileFavoritesStore {
    /// Creates a store for the document at `path`
    ///
    /// The file and its parent directories are created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let write_lock = path_lock(&path);
        Self { path, write_lock }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.favorites_path.clone())
    }

    /// Path of the favorites document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored set; a missing document is an empty set
    async fn read_set(&self) -> Result<FavoritesSet, PersistenceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FavoritesSet::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the stored document with `set`
    async fn write_set(&self, set: &FavoritesSet) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec_pretty(set)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write to temp file first, then atomic rename
        let temp_path = self.path.with_extension("json.tmp");
        if let Err(e) = tokio::fs::write(&temp_path, &json).await {
            warn!(path = %temp_path.display(), error = %e, "failed to write favorites");
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            warn!(path = %self.path.display(), error = %e, "failed to replace favorites");
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(path = %self.path.display(), count = set.len(), "wrote favorites");
        Ok(())
    }

    /// Applies `change` to the stored set under the write lock
    async fn modify<F>(&self, change: F) -> Result<(), PersistenceError>
    where
        F: FnOnce(&mut FavoritesSet) -> bool + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut set = self.read_set().await?;
        if change(&mut set) {
            self.write_set(&set).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl FavoritesStore for FileFavoritesStore {
    async fn save(&self, recipe: &Recipe) -> Result<(), PersistenceError> {
        self.modify(|set| set.insert(recipe)).await
    }

    async fn list(&self) -> Result<Vec<Recipe>, PersistenceError> {
        Ok(self.read_set().await?.into_vec())
    }

    async fn remove(&self, recipe: &Recipe) -> Result<(), PersistenceError> {
        self.modify(|set| set.remove(recipe.id)).await
    }

    async fn toggle(&self, recipe: &Recipe) -> Result<bool, PersistenceError> {
        let mut status = false;
        self.modify(|set| {
            status = set.toggle(recipe);
            true
        })
        .await?;
        Ok(status)
    }
}
