//! Configuration for the recipe services and favorites storage

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

/// Default recipe list endpoint
pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com/recipes";

/// How long a cached recipe list is trusted, in minutes
pub const CACHE_FRESHNESS_MINUTES: i64 = 30;

/// File name of the durable favorites document
pub const FAVORITES_FILE_NAME: &str = "favorite_recipes.json";

/// Configuration for `LiveRecipeService`
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Recipe list endpoint
    pub endpoint: String,
    /// Age after which a cached response is refetched
    pub freshness_window: chrono::Duration,
    /// Optional per-request timeout; none by default
    pub request_timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            freshness_window: chrono::Duration::minutes(CACHE_FRESHNESS_MINUTES),
            request_timeout: None,
        }
    }
}

impl FetcherConfig {
    /// Overrides the endpoint (e.g. a mock server in tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_freshness_window(mut self, window: chrono::Duration) -> Self {
        self.freshness_window = window;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Configuration for the durable favorites store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Location of the favorites document
    pub favorites_path: PathBuf,
}

impl StorageConfig {
    /// Uses the platform data directory (`~/.local/share/recipebox/` on Linux)
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "recipebox")?;
        Some(Self {
            favorites_path: project_dirs.data_dir().join(FAVORITES_FILE_NAME),
        })
    }

    /// Stores favorites under a custom directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            favorites_path: dir.into().join(FAVORITES_FILE_NAME),
        }
    }
}
