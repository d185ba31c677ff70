//! Enveloped JSON responders.
//!
//! Every handler answer goes through these helpers so that responses
//! carry the uniform `status`/`data`/`error`/`requestId` envelope and
//! echo the caller's `X-B3-TraceId`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use micron_core::{Envelope, ErrorData, PageResult, PagedEnvelope};
use serde::Serialize;

use crate::extract::TraceContext;

/// Responds 200 with `body` nested under `key` in the envelope.
pub fn success<T: Serialize>(ctx: &TraceContext, key: &str, body: T) -> Response {
    let data = serde_json::json!({ key: body });
    let envelope = Envelope::data(StatusCode::OK.as_u16(), data, ctx.trace_id.as_str());
    (StatusCode::OK, Json(envelope)).into_response()
}

/// Responds 200 with one page of `body` plus its pagination summary.
pub fn success_page<T: Serialize>(
    ctx: &TraceContext,
    key: &str,
    body: T,
    page: PageResult,
) -> Response {
    let data = serde_json::json!({ key: body });
    let envelope =
        PagedEnvelope::data(StatusCode::OK.as_u16(), data, page, ctx.trace_id.as_str());
    (StatusCode::OK, Json(envelope)).into_response()
}

/// Responds 206 for partially completed batch operations.
pub fn partial_success<T: Serialize>(ctx: &TraceContext, body: T) -> Response {
    let envelope = Envelope::data(
        StatusCode::PARTIAL_CONTENT.as_u16(),
        body,
        ctx.trace_id.as_str(),
    );
    (StatusCode::PARTIAL_CONTENT, Json(envelope)).into_response()
}

/// Responds with an error envelope; the status comes from the code.
pub fn error(ctx: &TraceContext, error: ErrorData) -> Response {
    let status = StatusCode::from_u16(error.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = Envelope::<()>::error(error, ctx.trace_id.as_str());
    (status, Json(envelope)).into_response()
}

/// Responds 400 `BAD_REQUEST`; an empty message keeps the default.
pub fn bad_request(ctx: &TraceContext, message: impl Into<String>) -> Response {
    error(ctx, ErrorData::bad_request(message))
}

/// Responds 403 `ACCESS_DENIED`; an empty message keeps the default.
pub fn access_denied(ctx: &TraceContext, message: impl Into<String>) -> Response {
    error(ctx, ErrorData::access_denied(message))
}

/// Responds 404 `NOT_FOUND`; an empty message keeps the default.
pub fn not_found(ctx: &TraceContext, message: impl Into<String>) -> Response {
    error(ctx, ErrorData::not_found(message))
}

/// Responds 500 `INTERNAL_SERVER_ERROR`; an empty message keeps the default.
pub fn internal_error(ctx: &TraceContext, message: impl Into<String>) -> Response {
    error(ctx, ErrorData::internal(message))
}

/// [`ErrorData`] as a response, for extractor and middleware rejections
/// that fire before a handler sees the request.
///
/// The trace id is not available at that point, so the envelope carries
/// an empty `requestId`.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, derive_more::From)]
pub struct ApiError(pub ErrorData);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(
            code = self.0.code.as_ref(),
            message = %self.0.message,
            details = self.0.details.len(),
            "HTTP error response"
        );

        let status = StatusCode::from_u16(self.0.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(Envelope::<()>::error(self.0, ""))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use micron_core::ErrorCode;

    use super::*;

    fn ctx() -> TraceContext {
        TraceContext {
            trace_id: "trace-1".into(),
            span_id: String::new(),
        }
    }

    #[test]
    fn success_nests_body_under_key() {
        let response = success(&ctx(), "products", vec!["a", "b"]);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn partial_success_is_partial_content() {
        let response = partial_success(&ctx(), vec!["done", "failed"]);
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    }

    #[test]
    fn error_status_follows_code() {
        let response = error(&ctx(), ErrorData::new(ErrorCode::NotFound));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = access_denied(&ctx(), "");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn api_error_maps_status() {
        let response = ApiError(ErrorData::bad_request("nope")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
