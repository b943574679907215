//! Live recipe API client
//!
//! Fetches the recipe list over HTTP, serving it from the shared
//! `ResponseCache` while the cached copy is inside the freshness window.

use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use tracing::{debug, info};

use super::{FetchError, NetworkError, RecipeService, Recipes};
use crate::cache::{CacheKey, ResponseCache};
use crate::config::FetcherConfig;

/// Client for the remote recipe list API
#[derive(Debug, Clone)]
pub struct LiveRecipeService {
    /// HTTP client for making requests
    http_client: Client,
    /// Response cache, shared with any clones of this service and, for the
    /// default and `from_config` constructors, with the whole process
    cache: ResponseCache,
    config: FetcherConfig,
}

impl Default for LiveRecipeService {
    fn default() -> Self {
        Self::with_client(Client::new(), FetcherConfig::default(), ResponseCache::shared())
    }
}

impl LiveRecipeService {
    /// Creates a service from configuration, building an HTTP client that
    /// honors the configured request timeout
    pub fn new(config: FetcherConfig, cache: ResponseCache) -> Result<Self, NetworkError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self::with_client(http_client, config, cache))
    }

    /// Creates a service over the process-wide response cache
    pub fn from_config(config: FetcherConfig) -> Result<Self, NetworkError> {
        Self::new(config, ResponseCache::shared())
    }

    /// Creates a service with a custom HTTP client
    pub fn with_client(http_client: Client, config: FetcherConfig, cache: ResponseCache) -> Self {
        Self {
            http_client,
            cache,
            config,
        }
    }

    /// The cache this service reads and populates
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Builds the GET request for the configured endpoint
    fn build_request(&self) -> Result<Request, NetworkError> {
        let url = Url::parse(&self.config.endpoint).map_err(|e| {
            NetworkError::InvalidUrl(format!("{} ({})", self.config.endpoint, e))
        })?;

        Ok(self.http_client.get(url).build()?)
    }

    /// Sends the request and returns the body of a 2xx response
    async fn fetch_from_api(&self, request: Request) -> Result<Vec<u8>, NetworkError> {
        let response = self.http_client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl RecipeService for LiveRecipeService {
    /// Fetches the recipe list
    ///
    /// # Behavior
    /// - Returns the cached payload if it is younger than the freshness window
    /// - Returns a cached payload with no recorded timestamp regardless of age
    /// - Otherwise fetches from the API, caches the payload, and returns it
    /// - Never falls back to an expired cache entry on failure
    async fn fetch_recipes(&self) -> Result<Recipes, FetchError> {
        let request = self.build_request()?;
        let key = CacheKey::from_request(&request);

        // Check cache first
        if let Some(cached) = self.cache.read(&key, self.config.freshness_window).await {
            if !cached.is_expired {
                match cached.cached_at {
                    Some(cached_at) => debug!(key = key.as_str(), %cached_at, "recipe cache hit"),
                    None => debug!(key = key.as_str(), "recipe cache hit without timestamp"),
                }
                return Ok(Recipes::from_slice(&cached.body)?);
            }
            debug!(key = key.as_str(), "recipe cache entry expired");
        }

        info!(url = %request.url(), "fetching recipes");
        let body = self.fetch_from_api(request).await?;
        let recipes = Recipes::from_slice(&body)?;

        self.cache.write(key, body).await;
        debug!(count = recipes.len(), "cached recipe response");

        Ok(recipes)
    }
}
