//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters for lookups, fetches, decisions)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging with per-request fields, never full table dumps
//! - Metrics are cheap counter increments, a no-op until a recorder installs

pub mod logging;
pub mod metrics;
