//! Request rewriting.
//!
//! # Responsibilities
//! - Replace the origin block with the resolved mapping's target
//! - Pin the `host` header to the target domain
//! - Leave method, uri, querystring and other headers untouched
//!
//! # Design Decisions
//! - Pure function: no I/O, no shared state, trivially idempotent
//! - The previous origin contributes nothing to the new one, including its
//!   custom headers (the routing configuration must not reach the target)

use crate::edge::request::{CustomOrigin, EdgeRequest, HeaderEntry, Headers, RequestOrigin};
use crate::store::VersionMapping;

const ORIGIN_PROTOCOL: &str = "https";
const ORIGIN_PORT: u16 = 443;
const ORIGIN_SSL_PROTOCOLS: [&str; 3] = ["TLSv1", "TLSv1.1", "TLSv1.2"];
const ORIGIN_READ_TIMEOUT_SECS: u64 = 5;
const ORIGIN_KEEPALIVE_TIMEOUT_SECS: u64 = 5;

/// Rewrite `request` to target the mapping's origin.
pub fn rewrite(mut request: EdgeRequest, mapping: &VersionMapping) -> EdgeRequest {
    request.origin = Some(RequestOrigin {
        custom: Some(CustomOrigin {
            domain_name: mapping.target_domain.clone(),
            port: ORIGIN_PORT,
            protocol: ORIGIN_PROTOCOL.to_string(),
            path: mapping.target_path.clone().unwrap_or_default(),
            ssl_protocols: ORIGIN_SSL_PROTOCOLS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            read_timeout: ORIGIN_READ_TIMEOUT_SECS,
            keepalive_timeout: ORIGIN_KEEPALIVE_TIMEOUT_SECS,
            custom_headers: Headers::new(),
        }),
    });

    request.headers.insert(
        "host".to_string(),
        vec![HeaderEntry::new("host", mapping.target_domain.clone())],
    );

    request
}
