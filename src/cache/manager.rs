//! Response cache for recipe list requests
//!
//! Provides a `ResponseCache` that keeps raw response payloads keyed by the
//! request that produced them, each stamped with the time it was stored.

use chrono::{DateTime, Duration, Utc};
use reqwest::Request;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tokio::sync::RwLock;

/// Identifies a cached response by request method and full URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for a built request
    pub fn from_request(request: &Request) -> Self {
        Self(format!("{} {}", request.method(), request.url()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored response payload
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Raw response body
    body: Vec<u8>,
    /// When the payload was stored; `None` for entries of unknown provenance
    cached_at: Option<DateTime<Utc>>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug, Clone)]
pub struct CachedData {
    /// The cached response body
    pub body: Vec<u8>,
    /// When the body was cached, if known
    pub cached_at: Option<DateTime<Utc>>,
    /// Whether the entry is older than the requested freshness window
    pub is_expired: bool,
}

/// Process-local cache of response payloads
///
/// Clones share the same underlying map, so a single cache can be handed to
/// every service that should see the same entries. Entries are never removed;
/// a stale entry is reported as expired and overwritten by the next write.
///
/// An entry without a timestamp is never reported as expired.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
}

impl ResponseCache {
    /// Creates an empty cache, isolated from every other cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the process-wide cache
    ///
    /// Every caller gets a clone of the same cache, so services built from it
    /// see each other's entries.
    pub fn shared() -> Self {
        static SHARED: OnceLock<ResponseCache> = OnceLock::new();
        SHARED.get_or_init(ResponseCache::new).clone()
    }

    /// Stores a payload stamped with the current time
    pub async fn write(&self, key: CacheKey, body: Vec<u8>) {
        self.write_at(key, body, Some(Utc::now())).await;
    }

    /// Stores a payload with an explicit timestamp
    ///
    /// Passing `None` stores an entry of unknown age, which readers trust
    /// regardless of the freshness window.
    pub async fn write_at(&self, key: CacheKey, body: Vec<u8>, cached_at: Option<DateTime<Utc>>) {
        let mut entries = self.entries.write().await;
        entries.insert(key, CacheEntry { body, cached_at });
    }

    /// Reads an entry, judging freshness against the current time
    ///
    /// # Arguments
    /// * `key` - The request key to look up
    /// * `max_age` - Freshness window; entries this old or older are expired
    ///
    /// # Returns
    /// * `Some(CachedData)` if an entry exists, expired or not
    /// * `None` if nothing was ever stored for `key`
    pub async fn read(&self, key: &CacheKey, max_age: Duration) -> Option<CachedData> {
        self.read_at(key, max_age, Utc::now()).await
    }

    /// Reads an entry, judging freshness against `now`
    pub async fn read_at(
        &self,
        key: &CacheKey,
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Option<CachedData> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        let is_expired = match entry.cached_at {
            Some(cached_at) => now - cached_at >= max_age,
            None => false,
        };

        Some(CachedData {
            body: entry.body.clone(),
            cached_at: entry.cached_at,
            is_expired,
        })
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Client, Method};

    const WINDOW_MINUTES: i64 = 30;

    fn key_for(url: &str) -> CacheKey {
        let request = Client::new()
            .request(Method::GET, url)
            .build()
            .expect("Request should build");
        CacheKey::from_request(&request)
    }

    fn window() -> Duration {
        Duration::minutes(WINDOW_MINUTES)
    }

    #[test]
    fn test_key_includes_method_and_url() {
        let key = key_for("https://example.com/recipes?limit=5");
        assert_eq!(key.as_str(), "GET https://example.com/recipes?limit=5");
    }

    #[test]
    fn test_keys_for_same_request_are_equal() {
        assert_eq!(
            key_for("https://example.com/recipes"),
            key_for("https://example.com/recipes")
        );
        assert_ne!(
            key_for("https://example.com/recipes"),
            key_for("https://example.com/recipes?skip=10")
        );
    }

    #[tokio::test]
    async fn test_read_returns_none_for_missing_key() {
        let cache = ResponseCache::new();

        let result = cache.read(&key_for("https://example.com/none"), window()).await;

        assert!(result.is_none(), "Should return None for missing key");
    }

    #[tokio::test]
    async fn test_read_returns_fresh_entry() {
        let cache = ResponseCache::new();
        let key = key_for("https://example.com/recipes");

        cache.write(key.clone(), b"payload".to_vec()).await;

        let result = cache.read(&key, window()).await.expect("Should read fresh cache");
        assert_eq!(result.body, b"payload");
        assert!(!result.is_expired, "Fresh cache should not be expired");
        assert!(result.cached_at.is_some());
    }

    #[tokio::test]
    async fn test_freshness_boundary() {
        let cache = ResponseCache::new();
        let key = key_for("https://example.com/recipes");
        let stored = Utc::now();

        cache.write_at(key.clone(), b"x".to_vec(), Some(stored)).await;

        let at_29 = cache
            .read_at(&key, window(), stored + Duration::minutes(29))
            .await
            .unwrap();
        assert!(!at_29.is_expired, "29 minutes should still be fresh");

        let at_30 = cache
            .read_at(&key, window(), stored + Duration::minutes(30))
            .await
            .unwrap();
        assert!(at_30.is_expired, "Exactly the window length is expired");

        let at_31 = cache
            .read_at(&key, window(), stored + Duration::minutes(31))
            .await
            .unwrap();
        assert!(at_31.is_expired, "31 minutes should be expired");
    }

    #[tokio::test]
    async fn test_entry_without_timestamp_never_expires() {
        let cache = ResponseCache::new();
        let key = key_for("https://example.com/recipes");

        cache.write_at(key.clone(), b"legacy".to_vec(), None).await;

        let far_future = Utc::now() + Duration::days(365);
        let result = cache.read_at(&key, window(), far_future).await.unwrap();

        assert_eq!(result.body, b"legacy");
        assert!(result.cached_at.is_none());
        assert!(!result.is_expired);
    }

    #[tokio::test]
    async fn test_overwrite_existing_entry() {
        let cache = ResponseCache::new();
        let key = key_for("https://example.com/recipes");

        cache
            .write_at(key.clone(), b"first".to_vec(), Some(Utc::now() - Duration::hours(2)))
            .await;
        cache.write(key.clone(), b"second".to_vec()).await;

        let result = cache.read(&key, window()).await.unwrap();
        assert_eq!(result.body, b"second", "Cache should contain latest data");
        assert!(!result.is_expired);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_shared_handles_see_same_entries() {
        let key = key_for("https://example.com/shared-handles");

        ResponseCache::shared().write(key.clone(), b"global".to_vec()).await;

        let result = ResponseCache::shared()
            .read(&key, window())
            .await
            .expect("Second handle should see entry");
        assert_eq!(result.body, b"global");
        assert!(ResponseCache::new().read(&key, window()).await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = ResponseCache::new();
        let shared = cache.clone();
        let key = key_for("https://example.com/recipes");

        assert!(shared.is_empty().await);
        cache.write(key.clone(), b"shared".to_vec()).await;

        let result = shared.read(&key, window()).await.expect("Clone should see entry");
        assert_eq!(result.body, b"shared");
    }
}
