//! Tenant and vendor context validation middleware.
//!
//! Every non-public route must carry the caller's tenant (or vendor)
//! header; requests without it are rejected with 403 `ACCESS_DENIED`
//! before any handler runs. The validated id is inserted into request
//! extensions for handlers to pick up.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, Display};
use micron_core::ErrorData;

use crate::TRACING_TARGET_CONTEXT;
use crate::headers::{X_REFERENCE_ID, X_TENANT_ID};
use crate::response::ApiError;

/// Configuration for context validation: which paths skip the check.
///
/// Exact-match exclude paths are caller-supplied; documentation paths
/// (`/swagger/`, `/thirdpartySwagger/`) are always public.
#[derive(Debug, Default, Clone)]
pub struct ContextConfig {
    exclude: Arc<BTreeSet<String>>,
}

impl ContextConfig {
    /// Creates a config with the given exact-match public paths.
    pub fn new<I, S>(exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: Arc::new(exclude.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns whether `path` bypasses context validation.
    pub fn is_public(&self, path: &str) -> bool {
        self.exclude.contains(path)
            || path.contains("/swagger/")
            || path.contains("/thirdpartySwagger/")
    }
}

/// Tenant id of the inbound request, inserted by [`require_tenant`].
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display)]
pub struct TenantId(pub String);

/// Vendor reference id of the inbound request, inserted by [`require_vendor`].
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display)]
pub struct VendorId(pub String);

/// Extension trait for `axum::`[`Router`] to apply context validation.
pub trait RouterContextExt {
    /// Requires `X-Tenant-Id` on all non-public routes.
    fn with_tenant_validation(self, config: ContextConfig) -> Self;

    /// Requires `X-Reference-Id` on all non-public routes.
    fn with_vendor_validation(self, config: ContextConfig) -> Self;
}

impl<S> RouterContextExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_tenant_validation(self, config: ContextConfig) -> Self {
        self.layer(from_fn_with_state(config, require_tenant))
    }

    fn with_vendor_validation(self, config: ContextConfig) -> Self {
        self.layer(from_fn_with_state(config, require_vendor))
    }
}

/// Rejects non-public requests missing the `X-Tenant-Id` header.
pub async fn require_tenant(
    State(config): State<ContextConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    if config.is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(tenant_id) = header_value(request.headers(), &X_TENANT_ID) else {
        tracing::warn!(
            target: TRACING_TARGET_CONTEXT,
            path = %request.uri().path(),
            "request without tenant header rejected"
        );
        return ApiError(ErrorData::access_denied("")).into_response();
    };

    request.extensions_mut().insert(TenantId(tenant_id));
    next.run(request).await
}

/// Rejects non-public requests missing the `X-Reference-Id` header.
pub async fn require_vendor(
    State(config): State<ContextConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    if config.is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(vendor_id) = header_value(request.headers(), &X_REFERENCE_ID) else {
        tracing::warn!(
            target: TRACING_TARGET_CONTEXT,
            path = %request.uri().path(),
            "request without vendor header rejected"
        );
        return ApiError(ErrorData::access_denied("")).into_response();
    };

    request.extensions_mut().insert(VendorId(vendor_id));
    next.run(request).await
}

/// Reads a non-empty UTF-8 header value.
fn header_value(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
