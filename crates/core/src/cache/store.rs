//! TTL-bounded response store.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default time-to-live for cached responses (1 minute).
pub const DEFAULT_TTL: Duration = Duration::from_millis(60_000);

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Bytes,
    expires_at: Instant,
}

/// Process-scoped response cache.
///
/// Created once at startup and shared with the request path. Entries are
/// written whole and replaced whole, so readers never observe a partial entry.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get an unexpired payload by fingerprint.
    pub async fn get(&self, fingerprint: &str) -> Option<Bytes> {
        let entries = self.entries.lock().await;
        entries
            .get(fingerprint)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.payload.clone())
    }

    /// Store a payload, replacing any previous entry for the fingerprint.
    pub async fn put(&self, fingerprint: &str, payload: Bytes) {
        let expires_at = Instant::now() + self.ttl;
        self.entries
            .lock()
            .await
            .insert(fingerprint.to_string(), CacheEntry { payload, expires_at });
        let ttl_ms = u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(fingerprint, ttl_ms, "cached response");
    }

    /// Delete every expired entry.
    ///
    /// Returns the number of deleted entries.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "cleaned up expired cache entries");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_put_and_get() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("fp", Bytes::from_static(br#"{"results":[]}"#)).await;

        let payload = cache.get("fp").await.unwrap();
        assert_eq!(payload, Bytes::from_static(br#"{"results":[]}"#));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = ResponseCache::default();
        assert!(cache.get("nonexistent").await.is_none());
        assert_eq!(cache.ttl(), DEFAULT_TTL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires() {
        let cache = ResponseCache::new(Duration::from_secs(1));
        cache.put("fp", Bytes::from_static(b"{}")).await;
        assert!(cache.get("fp").await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("fp").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_expired() {
        let cache = ResponseCache::new(Duration::from_secs(1));
        cache.put("a", Bytes::from_static(b"{}")).await;
        cache.put("b", Bytes::from_static(b"{}")).await;
        assert_eq!(cache.sweep_expired().await, 0);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.sweep_expired().await, 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_keeps_fresh_entries() {
        let cache = ResponseCache::new(Duration::from_secs(10));
        cache.put("old", Bytes::from_static(b"1")).await;

        tokio::time::advance(Duration::from_secs(6)).await;
        cache.put("new", Bytes::from_static(b"2")).await;

        tokio::time::advance(Duration::from_secs(6)).await;
        assert_eq!(cache.sweep_expired().await, 1);
        assert!(cache.get("old").await.is_none());
        assert!(cache.get("new").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_refreshes_expiry() {
        let cache = ResponseCache::new(Duration::from_secs(10));
        cache.put("fp", Bytes::from_static(b"old")).await;

        tokio::time::advance(Duration::from_secs(8)).await;
        cache.put("fp", Bytes::from_static(b"new")).await;

        tokio::time::advance(Duration::from_secs(8)).await;
        assert_eq!(cache.get("fp").await, Some(Bytes::from_static(b"new")));
    }
}
