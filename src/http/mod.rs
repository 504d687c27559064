//! HTTP surface for the invoking edge platform.
//!
//! # Data Flow
//! ```text
//! POST /origin-request (request descriptor JSON)
//!     → server.rs (axum setup, middleware)
//!     → request.rs (attach x-request-id)
//!     → EdgeHandler (resolve + rewrite)
//!     → 200 with the decision object, or 500 on configuration faults
//! ```

pub mod request;
pub mod server;

pub use request::{propagate_request_id, X_REQUEST_ID};
pub use server::HttpServer;
