//! Cross-origin headers and preflight handling.
//!
//! The relay allows every origin. The three `Access-Control-*` headers are
//! stamped on every response by `SetResponseHeaderLayer`s in the server, and
//! OPTIONS requests are answered here before routing.

use axum::{
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOW_ORIGIN: HeaderValue = HeaderValue::from_static("*");
pub const ALLOW_METHODS: HeaderValue = HeaderValue::from_static("GET, POST, OPTIONS");
pub const ALLOW_HEADERS: HeaderValue = HeaderValue::from_static("Content-Type");

/// Answer OPTIONS for any path with an empty 200.
///
/// No content type is set; the CORS headers are added by the outer layers.
pub async fn preflight_middleware(request: Request<Body>, next: Next) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "Answering CORS preflight");
    StatusCode::OK.into_response()
}
