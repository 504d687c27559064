//! Request ID middleware.
//!
//! # Responsibilities
//! - Attach a UUID `x-request-id` to requests that arrive without one
//! - Echo the ID on the response so callers can correlate logs

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header carrying the correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Axum middleware: ensure a request ID exists and propagate it.
pub async fn propagate_request_id(mut request: Request<Body>, next: Next) -> Response {
    if !request.headers().contains_key(X_REQUEST_ID) {
        let id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&id) {
            request.headers_mut().insert(X_REQUEST_ID, value);
        }
    }
    let id = request.headers().get(X_REQUEST_ID).cloned();

    let mut response = next.run(request).await;
    if let Some(id) = id {
        response.headers_mut().insert(X_REQUEST_ID, id);
    }
    response
}
