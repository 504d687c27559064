//! Edge request handling subsystem.
//!
//! # Data Flow
//! ```text
//! EdgeRequest (platform request descriptor)
//!     → handler.rs (extract table name + selector-header name from the
//!                   origin's custom configuration headers)
//!     → routing layer resolves the selector value
//!     → rewrite.rs (replace origin block, pin host header)
//!     → EdgeDecision::Forward(rewritten request)
//!       or EdgeDecision::Reject(403 + reason)
//! ```
//!
//! # Design Decisions
//! - Checks run in a fixed order: missing header, empty value, no mapping;
//!   the first failure is terminal
//! - Rejections never leak the mapping table, only the offending header name
//! - Missing routing configuration is a fault, not a 403: the deployment is
//!   broken and the surface reports it as a server error

pub mod handler;
pub mod request;
pub mod rewrite;

pub use handler::{EdgeDecision, EdgeHandler, HandlerError, Rejection};
pub use request::{CustomOrigin, EdgeRequest, HeaderEntry, Headers, RequestOrigin};
pub use rewrite::rewrite;

/// Custom origin header carrying the mapping table name.
pub const TABLE_NAME_HEADER: &str = "custom-apigw-table-name";

/// Custom origin header naming the version-selector request header.
pub const HEADER_NAME_HEADER: &str = "custom-apigw-header-name";
