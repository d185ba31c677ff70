//! Request tracing and access-log middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tower_http::request_id::MakeRequestUuid;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use crate::TRACING_TARGET_ACCESS;
use crate::headers::{X_B3_SPAN_ID, X_B3_TRACE_ID, X_TENANT_ID};

/// Creates request ID maker layer for generating unique request IDs.
pub fn create_request_id_layer() -> tower_http::request_id::SetRequestIdLayer<MakeRequestUuid> {
    tower_http::request_id::SetRequestIdLayer::new(
        header::HeaderName::from_static("x-request-id"),
        MakeRequestUuid,
    )
}

/// Creates request ID propagation layer.
pub fn create_propagate_request_id_layer() -> tower_http::request_id::PropagateRequestIdLayer {
    tower_http::request_id::PropagateRequestIdLayer::new(header::HeaderName::from_static(
        "x-request-id",
    ))
}

/// Creates trace layer for HTTP logging.
pub fn create_trace_layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
}

/// Creates sensitive headers layer to redact auth info from logs.
pub fn create_sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new([header::AUTHORIZATION, header::COOKIE])
}

/// Emits one structured access-log line per request.
///
/// Captures method, uri, status, latency, and the caller context
/// headers. Apply with `axum::middleware::from_fn`. Where the log lines
/// end up is the binary's subscriber configuration, not this crate's.
pub async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let uri = request.uri().clone();

    // The closure borrows `request`; keep it in a block so it is dead
    // before the await and the future stays `Send` (required by
    // `axum::middleware::from_fn`).
    let (tenant_id, domain, user_agent, trace_id, span_id) = {
        let header = |name: header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_owned()
        };
        (
            header(X_TENANT_ID),
            header(header::HeaderName::from_static("domain")),
            header(header::USER_AGENT),
            header(X_B3_TRACE_ID),
            header(X_B3_SPAN_ID),
        )
    };

    let response = next.run(request).await;

    tracing::info!(
        target: TRACING_TARGET_ACCESS,
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        tenant_id = %tenant_id,
        domain = %domain,
        user_agent = %user_agent,
        trace_id = %trace_id,
        span_id = %span_id,
        "request completed"
    );

    response
}
