//! Edge handler orchestration.
//!
//! Linear state machine, terminal at the first failure:
//! extract config → header present? → value non-empty? → mapping found?
//! → rewrite. Every rejection is a 403 with a short reason naming the
//! selector header; missing configuration is a fault instead.

use thiserror::Error;

use serde::Serialize;

use crate::edge::request::EdgeRequest;
use crate::edge::rewrite::rewrite;
use crate::edge::{HEADER_NAME_HEADER, TABLE_NAME_HEADER};
use crate::observability::metrics;
use crate::routing::MappingResolver;

/// Faults in the routing configuration itself.
///
/// These mean the deployment is broken, not the client request; the HTTP
/// surface maps them to a 500 rather than a 403.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request descriptor carries no custom origin block.
    #[error("request has no custom origin descriptor")]
    MissingOrigin,

    /// A required custom configuration header is absent or empty.
    #[error("required configuration header '{0}' is missing")]
    MissingConfigHeader(&'static str),
}

/// Rejection object consumed by the invoking platform to short-circuit
/// the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub status: String,
    pub status_description: String,
}

impl Rejection {
    fn forbidden(description: String) -> Self {
        Self {
            status: "403".to_string(),
            status_description: description,
        }
    }
}

/// Outcome of handling one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EdgeDecision {
    /// Forward the rewritten request upstream.
    Forward(EdgeRequest),
    /// Short-circuit with a 403.
    Reject(Rejection),
}

/// Orchestrates extraction, resolution and rewriting for one request.
#[derive(Clone)]
pub struct EdgeHandler {
    resolver: MappingResolver,
}

impl EdgeHandler {
    /// Create a handler over the given resolver.
    pub fn new(resolver: MappingResolver) -> Self {
        Self { resolver }
    }

    /// Handle one inbound request descriptor.
    pub async fn handle(&self, request: EdgeRequest) -> Result<EdgeDecision, HandlerError> {
        let custom = request
            .origin
            .as_ref()
            .and_then(|origin| origin.custom.as_ref())
            .ok_or(HandlerError::MissingOrigin)?;

        let table = custom
            .first_custom_header_value(TABLE_NAME_HEADER)
            .filter(|v| !v.is_empty())
            .ok_or(HandlerError::MissingConfigHeader(TABLE_NAME_HEADER))?
            .to_string();

        // Platform header maps are keyed by lowercase name.
        let header_name = custom
            .first_custom_header_value(HEADER_NAME_HEADER)
            .filter(|v| !v.is_empty())
            .ok_or(HandlerError::MissingConfigHeader(HEADER_NAME_HEADER))?
            .to_lowercase();

        let Some(entries) = request.headers.get(&header_name) else {
            metrics::record_decision("rejected_missing");
            return Ok(EdgeDecision::Reject(Rejection::forbidden(format!(
                "{header_name} header is missing."
            ))));
        };

        let selector = entries
            .first()
            .map(|entry| entry.value.as_str())
            .unwrap_or_default();
        if selector.is_empty() {
            metrics::record_decision("rejected_empty");
            return Ok(EdgeDecision::Reject(Rejection::forbidden(format!(
                "{header_name} header is empty."
            ))));
        }

        tracing::debug!(
            table = %table,
            header = %header_name,
            selector = %selector,
            "resolving version selector"
        );

        let Some(mapping) = self.resolver.resolve(&table, selector).await else {
            metrics::record_decision("rejected_unresolved");
            return Ok(EdgeDecision::Reject(Rejection::forbidden(format!(
                "{header_name} header is not a valid version."
            ))));
        };

        tracing::info!(
            header = %header_name,
            selector = %selector,
            target_domain = %mapping.target_domain,
            "request rewritten to mapped origin"
        );
        metrics::record_decision("forwarded");
        Ok(EdgeDecision::Forward(rewrite(request, &mapping)))
    }
}
