//! Header-driven origin router for a CDN edge layer.
//!
//! # Architecture Overview
//!
//! ```text
//! Inbound request descriptor (JSON)
//!     → http/server.rs (axum surface for the invoking edge platform)
//!     → edge/handler.rs (extract routing config + selector header)
//!     → routing/resolver.rs (case-insensitive selector lookup)
//!     → cache (TTL-bounded in-memory mapping set)
//!     → store (DynamoDB full scan on miss/expiry)
//!     → edge/rewrite.rs (replace origin block + host header)
//!     → rewritten request returned, or 403 rejection object
//! ```
//!
//! The only shared mutable state is the cache's single slot; everything
//! downstream of the handler communicates failures as plain values.

// Core subsystems
pub mod cache;
pub mod edge;
pub mod routing;
pub mod store;

// Cross-cutting concerns
pub mod config;
pub mod http;
pub mod observability;

pub use config::RouterConfig;
pub use edge::{EdgeDecision, EdgeHandler};
pub use http::HttpServer;
