// ============================================================================
// Request ID Middleware
// ============================================================================
//
// Every request gets an `x-request-id`. A client-supplied UUID is kept so a
// front-end can correlate its own logs; anything else is replaced with a
// fresh v4. The id is stored in request extensions as `RequestId` and echoed
// on the response.
//
// ============================================================================

use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId)
        .unwrap_or_else(|| RequestId(Uuid::new_v4()));

    request.extensions_mut().insert(request_id);

    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    tracing::info!(request_id = %request_id, method = %method, uri = %uri, "→ Incoming request");

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "← Outgoing response"
    );

    response
}

pub fn get_request_id(extensions: &axum::http::Extensions) -> Option<RequestId> {
    extensions.get::<RequestId>().copied()
}
