//! Request ID middleware for log and error correlation.
//!
//! Every request carries an ID: the one supplied by an upstream proxy when it
//! looks sane, otherwise a fresh UUID v4. The ID is stored in the request
//! extensions as [`RequestId`], tagged on the Sentry scope, and echoed back in
//! the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID that is trusted as-is.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Correlation ID of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Reuse `upstream` when it is a short, printable token; otherwise
    /// generate a new ID.
    fn resolve(upstream: Option<&str>) -> Self {
        upstream
            .filter(|id| {
                !id.is_empty()
                    && id.len() <= MAX_UPSTREAM_ID_LEN
                    && id.bytes().all(|b| b.is_ascii_graphic())
            })
            .map_or_else(|| Self(Uuid::new_v4().to_string()), |id| Self(id.to_owned()))
    }
}

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::resolve(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok()),
    );

    Span::current().record("request_id", request_id.0.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id.0);
    });

    let header = HeaderValue::from_str(&request_id.0).ok();
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
