//! Middleware for `axum::Router`.
//!
//! - Context validation: tenant/vendor header checks with exclude paths
//! - Observability: request ids, trace layer, access logging
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::Router;
//! use micron_server::middleware::{self, ContextConfig, RouterContextExt};
//!
//! let app: Router = Router::new()
//!     .with_tenant_validation(ContextConfig::new(["/health"]))
//!     .layer(axum::middleware::from_fn(middleware::access_log))
//!     .layer(middleware::create_trace_layer())
//!     .layer(middleware::create_propagate_request_id_layer())
//!     .layer(middleware::create_request_id_layer());
//! ```

mod context;
mod observability;

pub use context::{ContextConfig, RouterContextExt, TenantId, VendorId, require_tenant, require_vendor};
pub use observability::{
    access_log, create_propagate_request_id_layer, create_request_id_layer,
    create_sensitive_headers_layer, create_trace_layer,
};
