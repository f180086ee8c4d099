use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_count: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// In-memory response cache keyed by (request URL, current page).
///
/// Payloads are the parsed `data` field of a Jikan envelope, kept as raw
/// JSON. Free-text search responses are never written. Eviction is
/// all-or-nothing: one shared inactivity window, re-armed on every access;
/// when it elapses with no intervening access the entire map is dropped.
/// There is no per-entry TTL and no LRU.
pub struct ResponseCache {
    entries: Arc<DashMap<String, Value>>,
    in_flight: Arc<DashMap<String, ()>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    /// Instant at which the whole cache expires unless re-armed first.
    deadline: Arc<Mutex<Instant>>,
    touched: Arc<Notify>,
    watcher_started: Arc<AtomicBool>,
    watcher_token: CancellationToken,
    ttl: Duration,
    max_payload_chars: usize,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_payload_chars: usize) -> Self {
        let cache = Self {
            entries: Arc::new(DashMap::new()),
            in_flight: Arc::new(DashMap::new()),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            deadline: Arc::new(Mutex::new(Instant::now() + ttl)),
            touched: Arc::new(Notify::new()),
            watcher_started: Arc::new(AtomicBool::new(false)),
            watcher_token: CancellationToken::new(),
            ttl,
            max_payload_chars,
        };

        // Start the eviction watcher immediately when a runtime is available;
        // otherwise it starts on the first cache operation.
        if tokio::runtime::Handle::try_current().is_ok() {
            cache.ensure_watcher_started();
        }

        cache
    }

    /// Compose the cache key: full request URL plus the page the UI is on.
    /// Page is part of identity because the same filter at a different page
    /// is a different resource.
    pub fn key_for(url: &str, page: u32) -> String {
        format!("{}-{}", url, page)
    }

    /// Look up a payload; a hit re-arms the inactivity window.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.ensure_watcher_started();
        self.drop_if_expired();

        if let Some(entry) = self.entries.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            self.touch();
            debug!("Cache hit for key: {}", key);
            return Some(entry.value().clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for key: {}", key);
        None
    }

    /// Store a payload unless the request category is uncacheable or the
    /// serialized size is over the cutoff. Oversized payloads are computed
    /// but never cached; re-fetching them is the accepted cost of a bounded
    /// footprint.
    pub fn store(&self, key: &str, payload: &Value, cacheable: bool) {
        if !cacheable {
            return;
        }

        let serialized_len = payload.to_string().len();
        if serialized_len >= self.max_payload_chars {
            debug!(
                "Payload for key {} is {} chars, over the {} cutoff; not cached",
                key, serialized_len, self.max_payload_chars
            );
            return;
        }

        self.entries.insert(key.to_string(), payload.clone());
        self.touch();
        debug!("Cached payload for key: {} ({} chars)", key, serialized_len);
    }

    /// Cache-or-fetch in one step. `cacheable` is false for free-text search,
    /// which must always hit the network. A duplicate concurrent request for
    /// the same key waits briefly and re-checks the cache before fetching.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        cacheable: bool,
        fetch_fn: F,
    ) -> crate::shared::errors::AppResult<Value>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = crate::shared::errors::AppResult<Value>>,
    {
        self.ensure_watcher_started();

        if cacheable {
            if let Some(payload) = self.get(key) {
                return Ok(payload);
            }

            if self.in_flight.contains_key(key) {
                debug!("Fetch already in flight for key: {}, waiting", key);
                tokio::time::sleep(Duration::from_millis(100)).await;
                if let Some(payload) = self.get(key) {
                    return Ok(payload);
                }
            }

            self.in_flight.insert(key.to_string(), ());
        }

        let result = fetch_fn().await;

        if cacheable {
            self.in_flight.remove(key);
        }

        match result {
            Ok(payload) => {
                self.store(key, &payload, cacheable);
                Ok(payload)
            }
            Err(e) => Err(e),
        }
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.entries.clear();
        self.in_flight.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        info!("Response cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries_count: self.entries.len(),
        }
    }

    /// Stop the eviction watcher. Entries already in the map stay until an
    /// explicit clear.
    pub fn shutdown(&self) {
        self.watcher_token.cancel();
    }

    /// Re-arm the inactivity window.
    fn touch(&self) {
        *self.deadline.lock().unwrap() = Instant::now() + self.ttl;
        self.touched.notify_one();
    }

    /// Lazy eviction on the access path, so the inactivity contract holds
    /// even when the watcher task has not been scheduled yet.
    fn drop_if_expired(&self) {
        if self.entries.is_empty() {
            return;
        }
        let deadline = *self.deadline.lock().unwrap();
        if Instant::now() >= deadline {
            self.entries.clear();
            debug!("Inactivity window elapsed, cache dropped");
        }
    }

    /// Ensure the watcher task is started (idempotent)
    fn ensure_watcher_started(&self) {
        if tokio::runtime::Handle::try_current().is_err() {
            return;
        }
        if self
            .watcher_started
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return;
        }

        self.start_watcher();
        debug!("Cache eviction watcher started");
    }

    /// Background task: sleep until the shared deadline, drop the whole map
    /// if no access re-armed it in the meantime, then park until the next
    /// access.
    fn start_watcher(&self) {
        let entries = self.entries.clone();
        let deadline = self.deadline.clone();
        let touched = self.touched.clone();
        let token = self.watcher_token.clone();

        tokio::spawn(async move {
            loop {
                let next = *deadline.lock().unwrap();
                tokio::select! {
                    _ = token.cancelled() => break,
                    // An access moved the deadline; loop and sleep again.
                    _ = touched.notified() => continue,
                    _ = tokio::time::sleep_until(next) => {
                        let due = *deadline.lock().unwrap();
                        if Instant::now() >= due {
                            if !entries.is_empty() {
                                entries.clear();
                                debug!("Inactivity window elapsed, cache dropped");
                            }
                            // Nothing to watch until the next access.
                            tokio::select! {
                                _ = token.cancelled() => break,
                                _ = touched.notified() => {}
                            }
                        }
                    }
                }
            }
        });
    }
}

impl Drop for ResponseCache {
    fn drop(&mut self) {
        self.watcher_token.cancel();
    }
}
