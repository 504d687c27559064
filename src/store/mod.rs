//! Mapping store subsystem.
//!
//! # Data Flow
//! ```text
//! cache miss / expiry
//!     → MappingStore::fetch_all(table)
//!     → dynamo.rs (paginated full scan, bounded by timeout)
//!     → Vec<VersionMapping> or StoreError
//! ```
//!
//! # Design Decisions
//! - Trait seam so the cache can be tested against an in-memory store
//! - Full scan only; the table is small (one item per supported version)
//! - Errors are explicit values; callers fail closed on any of them
//! - Malformed items are skipped, never fatal

pub mod dynamo;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dynamo::DynamoMappingStore;

/// A single routing rule binding a selector header value to a target origin.
///
/// Wire attribute names in the remote table are `hk` (selector), `dn`
/// (target domain) and `dp` (optional target path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMapping {
    /// Selector header value, matched case-insensitively.
    #[serde(rename = "hk")]
    pub selector: String,

    /// Domain of the origin to route to. Required, non-empty.
    #[serde(rename = "dn")]
    pub target_domain: String,

    /// Optional path prefix on the target origin.
    #[serde(rename = "dp", default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
}

/// Errors that can occur while reading the mapping store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The scan request failed (transport or service error).
    #[error("scan of table '{table}' failed: {message}")]
    Scan { table: String, message: String },

    /// The scan did not complete within the configured bound.
    #[error("scan of table '{table}' timed out after {seconds}s")]
    Timeout { table: String, seconds: u64 },
}

/// Result type for mapping store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to the remote mapping table.
///
/// Implementations perform one full scan per call; amortization across
/// requests is the cache's job, not the store's.
#[async_trait::async_trait]
pub trait MappingStore: Send + Sync {
    /// Fetch every mapping in the given table.
    async fn fetch_all(&self, table: &str) -> StoreResult<Vec<VersionMapping>>;
}
