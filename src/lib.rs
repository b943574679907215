//! recipebox
//!
//! Core of a recipe-browsing application: fetching the recipe list through a
//! time-boxed response cache, and persisting favorite recipes.

pub mod cache;
pub mod config;
pub mod data;
pub mod favorites;
pub mod services;

pub use cache::ResponseCache;
pub use config::{FetcherConfig, StorageConfig};
pub use data::{
    Difficulty, FetchError, FixtureRecipeService, LiveRecipeService, NetworkError, Recipe,
    RecipeService, Recipes,
};
pub use favorites::{
    FavoritesStore, FileFavoritesStore, InMemoryFavoritesStore, MemoryStore, PersistenceError,
    SeededFavoritesStore,
};
pub use services::Services;
