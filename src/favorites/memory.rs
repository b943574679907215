//! In-memory key-value store and the ephemeral favorites store built on it
//!
//! `MemoryStore` keeps JSON-encoded documents under string keys. Reads run
//! concurrently; writes (`save`, `delete`, `reset`, `update`) take the lock
//! exclusively. Each store is an explicit instance: tests create their own and
//! services that should share state are handed clones of the same one.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use super::{FavoritesSet, FavoritesStore, PersistenceError};
use crate::data::Recipe;

/// Key under which `InMemoryFavoritesStore` keeps its set
pub const FAVORITES_KEY: &str = "favoriteRecipes";

/// Thread-safe in-memory store of JSON documents
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes `value` and stores it under `key`, replacing any previous value
    pub async fn save<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        let encoded = serde_json::to_vec(value)?;
        self.entries.write().await.insert(key.to_string(), encoded);
        Ok(())
    }

    /// Loads and decodes the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(None)` if nothing is stored under `key`
    /// * `Err` if the stored document does not decode as `T`
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .map(|bytes| serde_json::from_slice(bytes))
            .transpose()
    }

    /// Removes the value stored under `key`
    pub async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Removes every stored value
    pub async fn reset(&self) {
        self.entries.write().await.clear();
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Runs a read-modify-write cycle on `key` under the write lock
    ///
    /// `f` receives the decoded current value (`None` when absent) and may
    /// replace it. Afterwards the slot is encoded and stored, or removed when
    /// left as `None`. Nothing is written if `f` or encoding fails.
    pub async fn update<T, R, E, F>(&self, key: &str, f: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<serde_json::Error>,
        F: FnOnce(&mut Option<T>) -> Result<R, E>,
    {
        let mut entries = self.entries.write().await;

        let mut slot: Option<T> = entries
            .get(key)
            .map(|bytes| serde_json::from_slice(bytes))
            .transpose()?;

        let result = f(&mut slot)?;

        match slot {
            Some(value) => {
                let encoded = serde_json::to_vec(&value)?;
                entries.insert(key.to_string(), encoded);
            }
            None => {
                entries.remove(key);
            }
        }

        Ok(result)
    }
}

/// Ephemeral favorites store backed by a `MemoryStore`
#[derive(Debug, Clone)]
pub struct InMemoryFavoritesStore {
    store: MemoryStore,
}

impl Default for InMemoryFavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFavoritesStore {
    /// Creates a store with its own empty `MemoryStore`
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Creates a store over an existing `MemoryStore`
    pub fn with_store(store: MemoryStore) -> Self {
        Self { store }
    }

    /// The backing memory store
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[async_trait]
impl FavoritesStore for InMemoryFavoritesStore {
    async fn save(&self, recipe: &Recipe) -> Result<(), PersistenceError> {
        self.store
            .update(FAVORITES_KEY, |slot: &mut Option<FavoritesSet>| {
                slot.get_or_insert_with(FavoritesSet::default).insert(recipe);
                Ok::<_, PersistenceError>(())
            })
            .await
    }

    async fn list(&self) -> Result<Vec<Recipe>, PersistenceError> {
        let set: Option<FavoritesSet> = self.store.load(FAVORITES_KEY).await?;
        Ok(set.map(FavoritesSet::into_vec).unwrap_or_default())
    }

    async fn remove(&self, recipe: &Recipe) -> Result<(), PersistenceError> {
        self.store
            .update(FAVORITES_KEY, |slot: &mut Option<FavoritesSet>| {
                if let Some(set) = slot {
                    set.remove(recipe.id);
                }
                Ok::<_, PersistenceError>(())
            })
            .await
    }
    async fn toggle(&self, recipe: &Recipe) -> Result<bool, PersistenceError> {
        self.store
            .update(FAVORITES_KEY, |slot: &mut Option<FavoritesSet>| {
                Ok::<_, PersistenceError>(
                    slot.get_or_insert_with(FavoritesSet::default).toggle(recipe),
                )
            })
            .await
    }
}
