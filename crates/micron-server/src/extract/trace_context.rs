//! Trace context extraction from B3 headers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::headers::{X_B3_SPAN_ID, X_B3_TRACE_ID};

/// B3 trace identifiers of the inbound request.
///
/// Extraction is infallible: requests arriving without trace headers get
/// empty ids rather than a rejection, and the envelope's `requestId`
/// simply comes out empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Value of `X-B3-TraceId`, echoed as the envelope `requestId`.
    pub trace_id: String,
    /// Value of `X-B3-SpanId`.
    pub span_id: String,
}

impl TraceContext {
    /// Reads the trace context from a header map.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_owned()
        };

        Self {
            trace_id: get(&X_B3_TRACE_ID),
            span_id: get(&X_B3_SPAN_ID),
        }
    }
}

impl<S> FromRequestParts<S> for TraceContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
