//! Shared utilities for integration testing.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use edge_router::cache::{ManualClock, MappingCache, DEFAULT_TTL};
use edge_router::edge::{
    CustomOrigin, EdgeHandler, EdgeRequest, HeaderEntry, Headers, RequestOrigin,
    HEADER_NAME_HEADER, TABLE_NAME_HEADER,
};
use edge_router::routing::MappingResolver;
use edge_router::store::{MappingStore, StoreError, StoreResult, VersionMapping};

/// In-memory mapping store with fetch counting and failure injection.
pub struct CountingStore {
    mappings: Mutex<Vec<VersionMapping>>,
    fetches: AtomicUsize,
    failing: AtomicBool,
}

impl CountingStore {
    pub fn with(mappings: Vec<VersionMapping>) -> Arc<Self> {
        Arc::new(Self {
            mappings: Mutex::new(mappings),
            fetches: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        })
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_mappings(&self, mappings: Vec<VersionMapping>) {
        *self.mappings.lock().unwrap() = mappings;
    }
}

#[async_trait::async_trait]
impl MappingStore for CountingStore {
    async fn fetch_all(&self, table: &str) -> StoreResult<Vec<VersionMapping>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Scan {
                table: table.to_string(),
                message: "injected outage".to_string(),
            });
        }
        Ok(self.mappings.lock().unwrap().clone())
    }
}

/// A handler over a counting store and a manual clock.
pub struct TestRouter {
    pub handler: Arc<EdgeHandler>,
    pub store: Arc<CountingStore>,
    pub clock: Arc<ManualClock>,
}

pub fn test_router(mappings: Vec<VersionMapping>) -> TestRouter {
    test_router_with_ttl(mappings, DEFAULT_TTL)
}

pub fn test_router_with_ttl(mappings: Vec<VersionMapping>, ttl: Duration) -> TestRouter {
    let store = CountingStore::with(mappings);
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(MappingCache::new(store.clone(), clock.clone(), ttl));
    let handler = Arc::new(EdgeHandler::new(MappingResolver::new(cache)));
    TestRouter {
        handler,
        store,
        clock,
    }
}

pub fn mapping(selector: &str, domain: &str, path: Option<&str>) -> VersionMapping {
    VersionMapping {
        selector: selector.to_string(),
        target_domain: domain.to_string(),
        target_path: path.map(|p| p.to_string()),
    }
}

/// A request descriptor configured to route on the `APIV` header against
/// table `vers`, optionally carrying a selector value.
pub fn apiv_request(selector: Option<&str>) -> EdgeRequest {
    let mut custom_headers = Headers::new();
    custom_headers.insert(
        TABLE_NAME_HEADER.to_string(),
        vec![HeaderEntry::new(TABLE_NAME_HEADER, "vers")],
    );
    custom_headers.insert(
        HEADER_NAME_HEADER.to_string(),
        vec![HeaderEntry::new(HEADER_NAME_HEADER, "APIV")],
    );

    let mut headers = Headers::new();
    headers.insert(
        "host".to_string(),
        vec![HeaderEntry::new("Host", "edge.example.com")],
    );
    if let Some(value) = selector {
        headers.insert("apiv".to_string(), vec![HeaderEntry::new("APIV", value)]);
    }

    EdgeRequest {
        method: "GET".to_string(),
        uri: "/orders".to_string(),
        querystring: "limit=5".to_string(),
        headers,
        origin: Some(RequestOrigin {
            custom: Some(CustomOrigin {
                domain_name: "edge.example.com".to_string(),
                port: 443,
                protocol: "https".to_string(),
                path: String::new(),
                ssl_protocols: vec!["TLSv1.2".to_string()],
                read_timeout: 30,
                keepalive_timeout: 5,
                custom_headers,
            }),
        }),
    }
}
