//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::RouterConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a deserialized configuration for semantic errors.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a socket address: '{}'", config.listener.bind_address),
        });
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "listener.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.store.region.is_empty() {
        errors.push(ValidationError {
            field: "store.region",
            message: "must not be empty".to_string(),
        });
    }
    if config.store.scan_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "store.scan_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.cache.ttl_secs == 0 {
        errors.push(ValidationError {
            field: "cache.ttl_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "not a socket address: '{}'",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
