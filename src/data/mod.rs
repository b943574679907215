//! Core data models for recipebox
//!
//! This module contains the recipe types shared by the fetch services and the
//! favorites stores, along with the `RecipeService` capability and its live
//! (network + cache) and fixture (bundled JSON) implementations.

pub mod fixture;
pub mod live;
pub mod sample;

pub use fixture::FixtureRecipeService;
pub use live::LiveRecipeService;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recipe difficulty as reported by the recipe API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A single recipe
///
/// `id` is the only identity: two recipes with the same id are the same recipe
/// for deduplication purposes, regardless of the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique, stable identifier
    pub id: u32,
    /// Human-readable recipe name
    pub name: String,
    /// Ingredients in display order
    pub ingredients: Vec<String>,
    /// Preparation steps in order
    pub instructions: Vec<String>,
    /// Preparation time in minutes
    pub prep_time_minutes: u32,
    /// Cooking time in minutes
    pub cook_time_minutes: u32,
    /// Number of servings
    pub servings: u32,
    pub difficulty: Difficulty,
    /// Cuisine label (e.g. "Italian")
    pub cuisine: String,
    pub calories_per_serving: u32,
    /// Free-text tags
    pub tags: Vec<String>,
    /// Identifier of the user who posted the recipe
    #[serde(rename = "userId")]
    pub user_id: u32,
    /// Image URL
    pub image: String,
    /// Average rating, expected in 0.0..=5.0
    pub rating: f64,
    pub review_count: u32,
    /// Meal type labels (e.g. "Dinner", "Snack")
    pub meal_type: Vec<String>,
}

impl Recipe {
    /// Returns true when both values refer to the same recipe id
    pub fn same_recipe(&self, other: &Recipe) -> bool {
        self.id == other.id
    }

    /// Total time (prep + cook) in minutes, saturating at `u32::MAX`
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes.saturating_add(self.cook_time_minutes)
    }
}

/// The recipe collection returned by a single fetch
///
/// Pagination fields sent by the live API (`total`, `skip`, `limit`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipes {
    pub recipes: Vec<Recipe>,
}

impl Recipes {
    /// Decodes a `{ "recipes": [...] }` document
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Network-level failures of a live fetch
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The configured endpoint is not a valid URL
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The request could not be completed (timeout, DNS, connection refused)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Errors that can occur when fetching recipes
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Payload does not match the expected recipe schema
    #[error("Failed to decode recipes: {0}")]
    Decode(#[from] serde_json::Error),

    /// Fixture document is missing
    #[error("Recipe document not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Fixture document exists but could not be read
    #[error("Failed to read recipe document: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// True for failures a caller may reasonably retry by fetching again
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}

/// Capability for retrieving the current recipe collection
///
/// Implementations are selected at composition time: `LiveRecipeService` for
/// the real API, `FixtureRecipeService` for tests and offline use.
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Fetches the full recipe collection; all-or-nothing, no retries
    async fn fetch_recipes(&self) -> Result<Recipes, FetchError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_RECIPE: &str = r#"{
        "recipes": [
            {
                "id": 42,
                "name": "Test Soup",
                "ingredients": ["Water", "Salt"],
                "instructions": ["Boil water", "Add salt"],
                "prepTimeMinutes": 5,
                "cookTimeMinutes": 10,
                "servings": 2,
                "difficulty": "Hard",
                "cuisine": "Nowhere",
                "caloriesPerServing": 10,
                "tags": ["Soup"],
                "userId": 7,
                "image": "https://example.com/soup.webp",
                "rating": 3.5,
                "reviewCount": 4,
                "mealType": ["Lunch"]
            }
        ],
        "total": 1,
        "skip": 0,
        "limit": 30
    }"#;

    #[test]
    fn test_decode_camel_case_fields() {
        let recipes = Recipes::from_slice(SINGLE_RECIPE.as_bytes()).expect("Should decode");

        assert_eq!(recipes.len(), 1);
        let recipe = &recipes.recipes[0];
        assert_eq!(recipe.id, 42);
        assert_eq!(recipe.prep_time_minutes, 5);
        assert_eq!(recipe.cook_time_minutes, 10);
        assert_eq!(recipe.user_id, 7);
        assert_eq!(recipe.difficulty, Difficulty::Hard);
        assert_eq!(recipe.meal_type, vec!["Lunch".to_string()]);
        assert_eq!(recipe.total_time_minutes(), 15);
    }

    #[test]
    fn test_total_time_saturates_on_overflow() {
        let mut recipe = test_support::recipe(1, "Forever Stock");
        recipe.prep_time_minutes = u32::MAX;
        recipe.cook_time_minutes = 1;

        assert_eq!(recipe.total_time_minutes(), u32::MAX);
    }

    #[test]
    fn test_encode_uses_user_id_wire_name() {
        let recipe = test_support::recipe(1, "Bread");
        let json = serde_json::to_string(&recipe).expect("Should encode");

        assert!(json.contains("\"userId\":1"));
        assert!(json.contains("\"prepTimeMinutes\":10"));
        assert!(!json.contains("user_id"));
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let result = Recipes::from_slice(br#"{"recipes": [{"id": 1, "name": "No fields"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_difficulty() {
        let json = SINGLE_RECIPE.replace("\"Hard\"", "\"Impossible\"");
        assert!(Recipes::from_slice(json.as_bytes()).is_err());
    }

    #[test]
    fn test_same_recipe_compares_ids_only() {
        let a = test_support::recipe(1, "Bread");
        let mut b = a.clone();
        b.name = "Renamed".to_string();
        let c = test_support::recipe(2, "Bread");

        assert!(a.same_recipe(&b));
        assert!(!a.same_recipe(&c));
    }

    #[test]
    fn test_network_error_classification() {
        let err = FetchError::from(NetworkError::Status(503));
        assert!(err.is_network());
        assert!(err.to_string().contains("503"));

        let err = FetchError::NotFound(PathBuf::from("missing.json"));
        assert!(!err.is_network());
        assert!(err.to_string().contains("missing.json"));
    }
}
