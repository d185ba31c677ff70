#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for token verification.
pub const TRACING_TARGET_AUTH: &str = "micron_server::auth";

/// Tracing target for context-header middleware.
pub const TRACING_TARGET_CONTEXT: &str = "micron_server::middleware::context";

/// Tracing target for the access log.
pub const TRACING_TARGET_ACCESS: &str = "micron_server::middleware::access";

pub mod auth;
pub mod extract;
pub mod headers;
pub mod middleware;
pub mod response;

pub use micron_core::{
    Envelope, ErrorCode, ErrorData, ErrorDetail, Page, PageRequest, PageResult, PagedEnvelope,
    QueryModifier, SortFields, SortOrder,
};

pub use crate::auth::{AuthError, JwksClient};
pub use crate::response::ApiError;
