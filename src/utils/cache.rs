use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};
use tracing::debug;

/// Cached query result
#[derive(Debug, Clone)]
struct CacheItem<T> {
    value: T,
    fetched_at: Instant,
    invalidated: bool,
}

/// Invalidation counters. A key absent from `by_key` reads as generation 0.
/// `next` only grows, so a number is never handed out twice.
#[derive(Debug, Default)]
struct Generations {
    next: u64,
    by_key: HashMap<String, (u64, Instant)>,
}

impl Generations {
    fn of(&self, key: &str) -> u64 {
        self.by_key.get(key).map(|(generation, _)| *generation).unwrap_or(0)
    }
}

/// In-memory cache of query results with a freshness window and a retention
/// window.
///
/// A value is served only while it is fresh: younger than `stale_time` and
/// not invalidated. Stale values stay in the map until `retention` has passed
/// since they were fetched and the janitor drops them.
///
/// Each key also carries an invalidation generation. A reader takes
/// [`generation`](Self::generation) before fetching and stores the result with
/// [`set_if_current`](Self::set_if_current), so a response that was already in
/// flight when a write invalidated the key is never cached as fresh.
#[derive(Debug, Clone)]
pub struct QueryCache<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<String, CacheItem<T>>>>,
    generations: Arc<Mutex<Generations>>,
    stale_time: Duration,
    retention: Duration,
}

impl<T: Clone + Send + Sync + 'static> QueryCache<T> {
    pub fn new(stale_time: Duration, retention: Duration) -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
            generations: Arc::new(Mutex::new(Generations::default())),
            stale_time,
            retention,
        }
    }

    /// Stores a freshly fetched value, clearing any earlier invalidation.
    pub fn set(&self, key: impl Into<String>, value: T) {
        let item = CacheItem {
            value,
            fetched_at: Instant::now(),
            invalidated: false,
        };
        self.data.write().insert(key.into(), item);
    }

    /// Current invalidation generation of `key`.
    pub fn generation(&self, key: &str) -> u64 {
        self.generations.lock().of(key)
    }

    /// Stores `value` only if `key` has not been invalidated since `seen` was
    /// read. Returns whether the value was stored.
    pub fn set_if_current(&self, key: impl Into<String>, value: T, seen: u64) -> bool {
        let key = key.into();
        // Held across the insert so an invalidation cannot land in between.
        let generations = self.generations.lock();
        if generations.of(&key) != seen {
            debug!("Discarding {}: invalidated while the fetch was in flight", key);
            return false;
        }

        let item = CacheItem {
            value,
            fetched_at: Instant::now(),
            invalidated: false,
        };
        self.data.write().insert(key, item);
        drop(generations);
        true
    }

    /// Returns the value if it is still fresh.
    pub fn get_fresh(&self, key: &str) -> Option<T> {
        let data = self.data.read();
        let item = data.get(key)?;

        if item.invalidated || item.fetched_at.elapsed() >= self.stale_time {
            return None;
        }
        Some(item.value.clone())
    }

    /// Marks an entry stale so the next read refetches it. The value itself is
    /// kept until retention runs out. The key's generation moves on even when
    /// nothing is cached yet, since a first fetch may be in flight. Returns
    /// whether the key was present.
    pub fn invalidate(&self, key: &str) -> bool {
        let mut generations = self.generations.lock();
        generations.next += 1;
        let next = generations.next;
        generations.by_key.insert(key.to_string(), (next, Instant::now()));

        match self.data.write().get_mut(key) {
            Some(item) => {
                item.invalidated = true;
                true
            }
            None => false,
        }
    }

    pub fn is_invalidated(&self, key: &str) -> bool {
        self.data
            .read()
            .get(key)
            .map(|item| item.invalidated)
            .unwrap_or(false)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.data.write().remove(key).is_some()
    }

    pub fn size(&self) -> usize {
        self.data.read().len()
    }

    /// Drops entries past the retention window, and invalidation counters just
    /// as old. No fetch outlives the retention window, so a forgotten counter
    /// can no longer be compared against. Returns how many entries went.
    pub fn cleanup_expired(&self) -> usize {
        let mut data = self.data.write();
        let before = data.len();
        let retention = self.retention;
        data.retain(|_, item| item.fetched_at.elapsed() < retention);
        let evicted = before - data.len();
        drop(data);

        self.generations
            .lock()
            .by_key
            .retain(|_, (_, at)| at.elapsed() < retention);
        evicted
    }

    /// Runs [`cleanup_expired`](Self::cleanup_expired) every `every`.
    pub fn spawn_janitor(&self, every: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(every);
            loop {
                ticker.tick().await;
                let evicted = cache.cleanup_expired();
                if evicted > 0 {
                    debug!("Evicted {} expired cache entries", evicted);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    fn cache() -> QueryCache<String> {
        QueryCache::new(Duration::from_secs(300), Duration::from_secs(600))
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_basic_operations() {
        let cache = cache();

        cache.set("posts", "value1".to_string());
        assert_eq!(cache.get_fresh("posts"), Some("value1".to_string()));
        assert_eq!(cache.get_fresh("nonexistent"), None);

        assert!(cache.remove("posts"));
        assert_eq!(cache.get_fresh("posts"), None);
        assert_eq!(cache.size(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_goes_stale_after_freshness_window() {
        let cache = cache();
        cache.set("post:1", "hello".to_string());

        advance(Duration::from_secs(299)).await;
        assert!(cache.get_fresh("post:1").is_some());

        advance(Duration::from_secs(1)).await;
        assert!(cache.get_fresh("post:1").is_none());
        assert!(cache.contains("post:1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_keeps_entry_but_forces_refetch() {
        let cache = cache();
        cache.set("comments:1", "a".to_string());

        assert!(cache.invalidate("comments:1"));
        assert!(cache.get_fresh("comments:1").is_none());
        assert!(cache.is_invalidated("comments:1"));
        assert!(cache.contains("comments:1"));

        cache.set("comments:1", "b".to_string());
        assert_eq!(cache.get_fresh("comments:1"), Some("b".to_string()));
        assert!(!cache.is_invalidated("comments:1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_missing_key_stores_nothing() {
        let cache = cache();
        assert!(!cache.invalidate("posts"));
        assert_eq!(cache.size(), 0);
        assert_ne!(cache.generation("posts"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_overtaken_by_invalidation_is_not_cached() {
        let cache = cache();
        cache.set("posts", "before".to_string());
        assert!(cache.invalidate("posts"));

        // A read starts, then a write lands before its response arrives.
        let seen = cache.generation("posts");
        assert!(cache.invalidate("posts"));

        assert!(!cache.set_if_current("posts", "in flight".to_string(), seen));
        assert_eq!(cache.get_fresh("posts"), None);
        assert!(cache.is_invalidated("posts"));

        let seen = cache.generation("posts");
        assert!(cache.set_if_current("posts", "after".to_string(), seen));
        assert_eq!(cache.get_fresh("posts"), Some("after".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_overtaken_by_invalidation_is_not_cached() {
        let cache = cache();
        let seen = cache.generation("comments:1");

        cache.invalidate("comments:1");

        assert!(!cache.set_if_current("comments:1", "old".to_string(), seen));
        assert!(!cache.contains("comments:1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_forgets_only_old_generations() {
        let cache = cache();
        let seen = cache.generation("posts");
        cache.invalidate("posts");

        advance(Duration::from_secs(599)).await;
        cache.cleanup_expired();
        assert!(!cache.set_if_current("posts", "late".to_string(), seen));

        advance(Duration::from_secs(1)).await;
        cache.cleanup_expired();
        assert_eq!(cache.generation("posts"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_respects_retention() {
        let cache = cache();
        cache.set("old", "1".to_string());

        advance(Duration::from_secs(400)).await;
        cache.set("young", "2".to_string());
        assert_eq!(cache.cleanup_expired(), 0);

        advance(Duration::from_secs(200)).await;
        assert_eq!(cache.cleanup_expired(), 1);
        assert!(!cache.contains("old"));
        assert!(cache.contains("young"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_janitor_evicts_in_background() {
        let cache = cache();
        cache.set("posts", "x".to_string());
        let janitor = cache.spawn_janitor(Duration::from_secs(60));

        advance(Duration::from_secs(660)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        assert!(!cache.contains("posts"));
        janitor.abort();
    }
}
