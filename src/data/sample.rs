//! Bundled sample recipe document
//!
//! The same document backs the fixture fetch service and the seeded favorites
//! store, so both see identical recipes in identical order.

use super::Recipes;

/// Raw bytes of the bundled `{ "recipes": [...] }` document
pub const SAMPLE_RECIPES_JSON: &str = include_str!("../../assets/dummy-recipes.json");

/// Decodes the bundled sample document
pub fn sample_recipes() -> Result<Recipes, serde_json::Error> {
    Recipes::from_slice(SAMPLE_RECIPES_JSON.as_bytes())
}
