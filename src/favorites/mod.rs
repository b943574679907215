//! Favorites persistence
//!
//! The `FavoritesStore` capability stores the set of recipes a user marked as
//! favorite. Every mutation reads the whole set, changes it and writes the
//! whole set back; the implementations differ only in where the set lives:
//!
//! - `FileFavoritesStore`: a JSON document on disk
//! - `InMemoryFavoritesStore`: a `MemoryStore` owned by (or injected into) the store
//! - `SeededFavoritesStore`: a `MemoryStore` seeded with sample recipes on first list

pub mod file;
pub mod memory;
pub mod seeded;

pub use file::FileFavoritesStore;
pub use memory::{InMemoryFavoritesStore, MemoryStore};
pub use seeded::SeededFavoritesStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Recipe;

/// Errors that can occur while reading or writing favorites
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The storage medium failed
    #[error("Favorites storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded
    #[error("Favorites document is invalid: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Ordered set of favorite recipes, unique by id
///
/// Serialized as a bare JSON array. Decoding drops later duplicates of an id
/// already seen, so documents written by older appending writers load cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Recipe>", into = "Vec<Recipe>")]
pub struct FavoritesSet {
    recipes: Vec<Recipe>,
}

impl FavoritesSet {
    /// Appends `recipe` unless its id is already present; returns whether it was added
    pub fn insert(&mut self, recipe: &Recipe) -> bool {
        if self.contains(recipe.id) {
            return false;
        }
        self.recipes.push(recipe.clone());
        true
    }

    /// Removes the recipe with `id`; returns whether anything was removed
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        self.recipes.len() != before
    }

    /// Removes `recipe` if present, inserts it otherwise; returns the new status
    pub fn toggle(&mut self, recipe: &Recipe) -> bool {
        if self.remove(recipe.id) {
            false
        } else {
            self.insert(recipe)
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.recipes.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn as_slice(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn into_vec(self) -> Vec<Recipe> {
        self.recipes
    }
}

impl From<Vec<Recipe>> for FavoritesSet {
    fn from(recipes: Vec<Recipe>) -> Self {
        let mut set = FavoritesSet::default();
        for recipe in &recipes {
            set.insert(recipe);
        }
        set
    }
}

impl From<FavoritesSet> for Vec<Recipe> {
    fn from(set: FavoritesSet) -> Self {
        set.recipes
    }
}

/// Capability for storing a user's favorite recipes
///
/// All operations are fallible; a failed `save` or `remove` leaves the
/// previously stored set unchanged.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Adds `recipe` if its id is not already a favorite
    async fn save(&self, recipe: &Recipe) -> Result<(), PersistenceError>;

    /// Returns favorites in the order they were added
    async fn list(&self) -> Result<Vec<Recipe>, PersistenceError>;

    /// Removes the favorite with `recipe.id`, if any
    async fn remove(&self, recipe: &Recipe) -> Result<(), PersistenceError>;

    /// Whether a recipe with `id` is currently a favorite
    async fn is_favorite(&self, id: u32) -> Result<bool, PersistenceError> {
        Ok(self.list().await?.iter().any(|r| r.id == id))
    }

    /// Flips the favorite status of `recipe` and returns the new status
    ///
    /// The provided version checks and then mutates in two steps, so two
    /// concurrent toggles can both observe the same status. The stores in this
    /// crate override it with a single read-modify-write.
    async fn toggle(&self, recipe: &Recipe) -> Result<bool, PersistenceError> {
        if self.is_favorite(recipe.id).await? {
            self.remove(recipe).await?;
            Ok(false)
        } else {
            self.save(recipe).await?;
            Ok(true)
        }
    }
}
