//! Favorites store that starts out with sample recipes
//!
//! On the first `list()` for which nothing has been recorded, the store picks
//! `SEED_COUNT` recipes from its sample (the bundled sample document unless
//! one is supplied) and stores them. From then on it behaves exactly like the
//! in-memory store. `save` and `remove` never seed; either one, made before
//! the first `list()`, records a set and so suppresses seeding.

use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::info;

use super::memory::MemoryStore;
use super::{FavoritesSet, FavoritesStore, PersistenceError};
use crate::data::sample::sample_recipes;
use crate::data::Recipe;

/// Key under which `SeededFavoritesStore` keeps its set
pub const SEEDED_FAVORITES_KEY: &str = "prefilled_favorite_recipes";

/// Number of recipes placed in a fresh seeded store
pub const SEED_COUNT: usize = 3;

/// Ephemeral favorites store prefilled from a fixed sample
#[derive(Debug, Clone)]
pub struct SeededFavoritesStore {
    store: MemoryStore,
    /// Custom sample; the bundled sample document is used when `None`
    sample: Option<Arc<Vec<Recipe>>>,
    /// Pick a random subset instead of the first `SEED_COUNT` recipes
    randomized: bool,
}

impl SeededFavoritesStore {
    /// Creates a store seeded from the bundled sample
    pub fn new(randomized: bool) -> Self {
        Self::with_store(MemoryStore::new(), randomized)
    }

    /// Creates a store over an existing `MemoryStore`
    pub fn with_store(store: MemoryStore, randomized: bool) -> Self {
        Self {
            store,
            sample: None,
            randomized,
        }
    }

    /// Replaces the seed sample
    pub fn with_sample(mut self, sample: Vec<Recipe>) -> Self {
        self.sample = Some(Arc::new(sample));
        self
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Chooses the recipes for a fresh store
    fn pick_seed(&self) -> Result<Vec<Recipe>, PersistenceError> {
        let sample = match &self.sample {
            Some(sample) => sample.as_ref().clone(),
            None => sample_recipes()?.recipes,
        };

        if self.randomized {
            let mut shuffled = sample;
            shuffled.shuffle(&mut rand::rng());
            shuffled.truncate(SEED_COUNT);
            Ok(shuffled)
        } else {
            Ok(sample.into_iter().take(SEED_COUNT).collect())
        }
    }
}

#[async_trait]
impl FavoritesStore for SeededFavoritesStore {
    async fn save(&self, recipe: &Recipe) -> Result<(), PersistenceError> {
        self.store
            .update(SEEDED_FAVORITES_KEY, |slot: &mut Option<FavoritesSet>| {
                slot.get_or_insert_with(FavoritesSet::default).insert(recipe);
                Ok::<_, PersistenceError>(())
            })
            .await
    }

    async fn list(&self) -> Result<Vec<Recipe>, PersistenceError> {
        if let Some(set) = self.store.load::<FavoritesSet>(SEEDED_FAVORITES_KEY).await? {
            return Ok(set.into_vec());
        }

        // Another caller may seed between the read above and taking the write lock
        self.store
            .update(SEEDED_FAVORITES_KEY, |slot: &mut Option<FavoritesSet>| {
                if slot.is_none() {
                    let seed = self.pick_seed()?;
                    info!(count = seed.len(), randomized = self.randomized, "seeding favorites");
                    *slot = Some(FavoritesSet::from(seed));
                }
                Ok::<_, PersistenceError>(
                    slot.as_ref()
                        .map(|set| set.as_slice().to_vec())
                        .unwrap_or_default(),
                )
            })
            .await
    }

    async fn remove(&self, recipe: &Recipe) -> Result<(), PersistenceError> {
        self.store
            .update(SEEDED_FAVORITES_KEY, |slot: &mut Option<FavoritesSet>| {
                slot.get_or_insert_with(FavoritesSet::default).remove(recipe.id);
                Ok::<_, PersistenceError>(())
            })
            .await
    }

    /// Seeds first when nothing was recorded, so the flip applies to what
    /// `list()` would have shown
    async fn toggle(&self, recipe: &Recipe) -> Result<bool, PersistenceError> {
        self.store
            .update(SEEDED_FAVORITES_KEY, |slot: &mut Option<FavoritesSet>| {
                if slot.is_none() {
                    let seed = self.pick_seed()?;
                    info!(count = seed.len(), randomized = self.randomized, "seeding favorites");
                    *slot = Some(FavoritesSet::from(seed));
                }
                Ok::<_, PersistenceError>(
                    slot.get_or_insert_with(FavoritesSet::default).toggle(recipe),
                )
            })
            .await
    }
}
