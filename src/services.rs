//! Composition of recipe and favorites services
//!
//! The recipe service and the favorites store never depend on each other; the
//! application picks one implementation of each and hands them to its screens.

use std::sync::Arc;

use crate::config::{FetcherConfig, StorageConfig};
use crate::data::{FixtureRecipeService, LiveRecipeService, NetworkError, RecipeService};
use crate::favorites::{FavoritesStore, FileFavoritesStore, SeededFavoritesStore};

/// The service pair an application runs with
#[derive(Clone)]
pub struct Services {
    pub recipes: Arc<dyn RecipeService>,
    pub favorites: Arc<dyn FavoritesStore>,
}

impl Services {
    /// Builds services from explicit implementations
    pub fn new(recipes: Arc<dyn RecipeService>, favorites: Arc<dyn FavoritesStore>) -> Self {
        Self { recipes, favorites }
    }

    /// Live API over the process-wide response cache, favorites on disk
    pub fn live(fetcher: FetcherConfig, storage: &StorageConfig) -> Result<Self, NetworkError> {
        let recipes = LiveRecipeService::from_config(fetcher)?;
        Ok(Self::new(
            Arc::new(recipes),
            Arc::new(FileFavoritesStore::from_config(storage)),
        ))
    }

    /// Bundled sample recipes and seeded in-memory favorites; no network or disk
    pub fn preview(randomized: bool) -> Self {
        Self::new(
            Arc::new(FixtureRecipeService::bundled()),
            Arc::new(SeededFavoritesStore::new(randomized)),
        )
    }
}
