//! Fixture-backed recipe service
//!
//! Decodes a fixed recipe document instead of calling the API. Used for tests,
//! previews and offline runs; it never touches the network or the cache.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::sample::SAMPLE_RECIPES_JSON;
use super::{FetchError, RecipeService, Recipes};

/// Where the fixture document comes from
#[derive(Debug, Clone)]
enum FixtureSource {
    /// The sample document compiled into the crate
    Bundled,
    /// A JSON document on disk
    File(PathBuf),
}

/// Recipe service that reads a local `{ "recipes": [...] }` document
#[derive(Debug, Clone)]
pub struct FixtureRecipeService {
    source: FixtureSource,
}

impl Default for FixtureRecipeService {
    fn default() -> Self {
        Self::bundled()
    }
}

impl FixtureRecipeService {
    /// Serves the bundled sample recipes
    pub fn bundled() -> Self {
        Self {
            source: FixtureSource::Bundled,
        }
    }

    /// Serves recipes from a JSON file, read on every fetch
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: FixtureSource::File(path.into()),
        }
    }
}

#[async_trait]
impl RecipeService for FixtureRecipeService {
    async fn fetch_recipes(&self) -> Result<Recipes, FetchError> {
        match &self.source {
            FixtureSource::Bundled => Ok(Recipes::from_slice(SAMPLE_RECIPES_JSON.as_bytes())?),
            FixtureSource::File(path) => {
                debug!(path = %path.display(), "reading recipe fixture");
                let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
                    ErrorKind::NotFound => FetchError::NotFound(path.clone()),
                    _ => FetchError::Io(e),
                })?;
                Ok(Recipes::from_slice(&bytes)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bundled_fixture_first_recipe() {
        let service = FixtureRecipeService::bundled();

        let recipes = service.fetch_recipes().await.expect("Bundled fixture should decode");

        assert_eq!(
            recipes.recipes.first().map(|r| r.name.as_str()),
            Some("Classic Margherita Pizza")
        );
    }

    #[tokio::test]
    async fn test_file_fixture_reads_document() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("recipes.json");
        std::fs::write(&path, SAMPLE_RECIPES_JSON).unwrap();

        let recipes = FixtureRecipeService::from_path(&path).fetch_recipes().await.unwrap();

        assert_eq!(recipes, FixtureRecipeService::bundled().fetch_recipes().await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing.json");

        let err = FixtureRecipeService::from_path(&path)
            .fetch_recipes()
            .await
            .unwrap_err();

        match err {
            FetchError::NotFound(missing) => assert_eq!(missing, path),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_file_is_decode_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FixtureRecipeService::from_path(&path)
            .fetch_recipes()
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }
}
