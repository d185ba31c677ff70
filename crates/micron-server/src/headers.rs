//! Context header names and outbound propagation.
//!
//! Services forward the caller's identity and trace context on every
//! service-to-service call so that downstream logs and tenant checks see
//! the same request the edge saw.

use axum::http::{HeaderMap, HeaderName};

/// Tenant the request acts on behalf of.
pub const X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");
/// End user the request acts on behalf of.
pub const X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");
/// Vendor reference, forwarded only for vendor-authenticated calls.
pub const X_REFERENCE_ID: HeaderName = HeaderName::from_static("x-reference-id");
/// Authentication flavor of the inbound call (`vendor` or tenant).
pub const X_AUTH_TYPE: HeaderName = HeaderName::from_static("x-auth-type");
/// B3 trace id, echoed into every envelope as `requestId`.
pub const X_B3_TRACE_ID: HeaderName = HeaderName::from_static("x-b3-traceid");
/// B3 span id.
pub const X_B3_SPAN_ID: HeaderName = HeaderName::from_static("x-b3-spanid");
/// Display name of the caller.
pub const X_NAME: HeaderName = HeaderName::from_static("x-name");

/// Headers copied verbatim onto every outbound call.
const FORWARDED: [HeaderName; 5] = [X_TENANT_ID, X_USER_ID, X_B3_TRACE_ID, X_B3_SPAN_ID, X_NAME];

/// Builds the header set to attach to an outbound service call.
///
/// Copies the context headers from the inbound request. `X-Reference-Id`
/// is forwarded only when the inbound call was vendor-authenticated
/// (`X-Auth-Type: vendor`). Pass the result to
/// `reqwest::RequestBuilder::headers`.
pub fn propagate_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::new();

    for name in FORWARDED {
        if let Some(value) = inbound.get(&name) {
            outbound.insert(name, value.clone());
        }
    }

    let is_vendor = inbound
        .get(X_AUTH_TYPE)
        .is_some_and(|value| value.as_bytes() == b"vendor");
    if is_vendor && let Some(value) = inbound.get(X_REFERENCE_ID) {
        outbound.insert(X_REFERENCE_ID, value.clone());
        outbound.insert(X_AUTH_TYPE, inbound[&X_AUTH_TYPE].clone());
    }

    outbound
}
