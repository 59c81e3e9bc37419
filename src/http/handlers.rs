//! Request dispatch.
//!
//! Every request lands in `dispatch`, which sends relay targets to the
//! upstream client and everything else to the static file service.

use std::convert::Infallible;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;

use crate::http::response::relay_response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::{self, SeriesQuery};

/// Catch-all handler.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let is_relay = request.method() == Method::GET
        && request
            .uri()
            .path_and_query()
            .is_some_and(|pq| relay::is_relay_target(pq.as_str()));

    if is_relay {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let query = request.uri().query().unwrap_or_default();
        relay_series(&state, &request_id, query).await
    } else {
        serve_static(&state, request).await
    }
}

/// Forward one series request and render the outcome.
async fn relay_series(state: &AppState, request_id: &str, query: &str) -> Response {
    let start_time = Instant::now();
    let series = SeriesQuery::from_query(query);

    let result = state.upstream.fetch(&series).await;

    match &result {
        Ok(body) => {
            tracing::info!(
                request_id = %request_id,
                bytes = body.len(),
                "Upstream response received"
            );
            metrics::record_relay("success", start_time);
        }
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                error = %err,
                message = %err.message(),
                "Relay request failed"
            );
            metrics::record_relay(err.outcome(), start_time);
        }
    }

    relay_response(result, state.strict_status)
}

/// Hand the request to the static file service.
async fn serve_static(state: &AppState, request: Request<Body>) -> Response {
    let result: Result<_, Infallible> = state.static_files.clone().oneshot(request).await;
    match result {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
