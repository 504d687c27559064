//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! selector value (from the version header)
//!     → resolver.rs (case-insensitive lookup against the cached set)
//!     → Return: matched VersionMapping or None
//! ```
//!
//! # Design Decisions
//! - Exactly one lookup per request on one header value (no rule engine)
//! - Lowercase comparison on both sides, first match wins on duplicates
//! - Store errors degrade to not-found: fail closed, never forward blind

pub mod resolver;

pub use resolver::MappingResolver;
