//! DynamoDB-backed mapping store with timeout and error handling.
//!
//! # Responsibilities
//! - Scan the mapping table (paginated) and decode items
//! - Bound the scan by a finite timeout so a slow store never stalls requests
//! - Surface transport failures as `StoreError`, never panics

use std::collections::HashMap;
use std::time::Duration;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tokio::time::timeout;

use crate::store::{MappingStore, StoreError, StoreResult, VersionMapping};

/// Mapping store backed by a DynamoDB table.
#[derive(Clone)]
pub struct DynamoMappingStore {
    client: Client,
    scan_timeout: Duration,
}

impl DynamoMappingStore {
    /// Create a new store around an SDK client.
    pub fn new(client: Client, scan_timeout: Duration) -> Self {
        Self {
            client,
            scan_timeout,
        }
    }

    async fn scan_table(&self, table: &str) -> StoreResult<Vec<VersionMapping>> {
        let mut mappings = Vec::new();
        let mut items = self
            .client
            .scan()
            .table_name(table)
            .into_paginator()
            .items()
            .send();

        while let Some(item) = items.next().await {
            let item = item.map_err(|e| StoreError::Scan {
                table: table.to_string(),
                message: e.to_string(),
            })?;
            match parse_item(&item) {
                Some(mapping) => mappings.push(mapping),
                None => {
                    tracing::warn!(table = %table, "skipping malformed mapping item");
                }
            }
        }

        tracing::debug!(table = %table, count = mappings.len(), "mapping scan complete");
        Ok(mappings)
    }
}

#[async_trait::async_trait]
impl MappingStore for DynamoMappingStore {
    async fn fetch_all(&self, table: &str) -> StoreResult<Vec<VersionMapping>> {
        match timeout(self.scan_timeout, self.scan_table(table)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                table: table.to_string(),
                seconds: self.scan_timeout.as_secs(),
            }),
        }
    }
}

/// Decode one table item into a mapping.
///
/// Items without a non-empty `hk` and `dn` are rejected; `dp` is optional.
fn parse_item(item: &HashMap<String, AttributeValue>) -> Option<VersionMapping> {
    let selector = item.get("hk")?.as_s().ok()?.clone();
    let target_domain = item.get("dn")?.as_s().ok()?.clone();
    if selector.is_empty() || target_domain.is_empty() {
        return None;
    }
    let target_path = item.get("dp").and_then(|v| v.as_s().ok()).cloned();
    Some(VersionMapping {
        selector,
        target_domain,
        target_path,
    })
}
