//! Mapping cache subsystem.
//!
//! # Data Flow
//! ```text
//! resolver lookup
//!     → MappingCache::mappings(table)
//!     → fresh slot? return without store access
//!     → expired/empty? single-flight refresh via MappingStore
//!     → non-empty fetch cached with fetched_at = clock.now()
//!     → empty fetch / store error never cached (no negative caching)
//! ```
//!
//! # Design Decisions
//! - One slot per cache; this process serves one mapping table at a time
//! - Expiry is lazy: `now - fetched_at >= ttl` checked on read, no timers
//! - Refresh serialized behind a mutex so concurrent misses coalesce
//! - Clock injected so TTL behavior is testable without sleeping

pub mod clock;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

use crate::observability::metrics;
use crate::store::{MappingStore, StoreResult, VersionMapping};

pub use clock::{Clock, ManualClock, SystemClock};

/// One refresh generation of the mapping table, shared across lookups.
pub type MappingSet = Arc<Vec<VersionMapping>>;

/// Default time-to-live for a cached mapping set: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    table: String,
    mappings: MappingSet,
    fetched_at: Instant,
}

/// TTL-bounded, single-slot cache over the mapping store.
pub struct MappingCache {
    store: Arc<dyn MappingStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
    refresh: Mutex<()>,
}

impl MappingCache {
    /// Create a cache over the given store with the given TTL.
    pub fn new(store: Arc<dyn MappingStore>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            store,
            clock,
            ttl,
            slot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Return the mapping set for `table`, refreshing from the store if the
    /// cached generation is absent, expired, or belongs to another table.
    ///
    /// `Ok(None)` means the store scan returned zero items; `Err` means the
    /// scan itself failed. Neither outcome is cached, so the next call
    /// retries the fetch.
    pub async fn mappings(&self, table: &str) -> StoreResult<Option<MappingSet>> {
        if let Some(set) = self.fresh(table).await {
            metrics::record_cache_lookup("hit");
            return Ok(Some(set));
        }

        let _guard = self.refresh.lock().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(set) = self.fresh(table).await {
            metrics::record_cache_lookup("hit");
            return Ok(Some(set));
        }
        metrics::record_cache_lookup("miss");

        let fetched = match self.store.fetch_all(table).await {
            Ok(items) => {
                metrics::record_store_fetch("ok");
                items
            }
            Err(e) => {
                metrics::record_store_fetch("error");
                return Err(e);
            }
        };
        if fetched.is_empty() {
            tracing::warn!(table = %table, "mapping scan returned no items, not caching");
            return Ok(None);
        }

        tracing::info!(
            table = %table,
            count = fetched.len(),
            ttl_secs = self.ttl.as_secs(),
            "mapping set cached"
        );
        let set: MappingSet = Arc::new(fetched);
        *self.slot.write().await = Some(CacheEntry {
            table: table.to_string(),
            mappings: set.clone(),
            fetched_at: self.clock.now(),
        });
        Ok(Some(set))
    }

    async fn fresh(&self, table: &str) -> Option<MappingSet> {
        let slot = self.slot.read().await;
        let entry = slot.as_ref()?;
        if entry.table != table {
            return None;
        }
        if self.clock.now().duration_since(entry.fetched_at) >= self.ttl {
            return None;
        }
        Some(entry.mappings.clone())
    }
}
