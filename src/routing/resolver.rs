//! Selector-to-mapping resolution.

use std::sync::Arc;

use crate::cache::MappingCache;
use crate::store::VersionMapping;

/// Resolves a selector header value to a version mapping via the cache.
#[derive(Clone)]
pub struct MappingResolver {
    cache: Arc<MappingCache>,
}

impl MappingResolver {
    /// Create a resolver over the given cache.
    pub fn new(cache: Arc<MappingCache>) -> Self {
        Self { cache }
    }

    /// Look up the mapping whose selector matches `selector`,
    /// case-insensitively. First match wins on duplicate selectors.
    ///
    /// Returns `None` for an empty selector, an empty mapping table, a store
    /// outage, or no match; the caller treats all of those identically.
    pub async fn resolve(&self, table: &str, selector: &str) -> Option<VersionMapping> {
        if selector.is_empty() {
            return None;
        }
        let set = match self.cache.mappings(table).await {
            Ok(Some(set)) => set,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(table = %table, error = %e, "mapping store unavailable");
                return None;
            }
        };
        let wanted = selector.to_lowercase();
        set.iter()
            .find(|m| m.selector.to_lowercase() == wanted)
            .cloned()
    }
}
