#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for pagination resolution.
///
/// Use this target for logging dropped sort fields and applied defaults.
pub const TRACING_TARGET_PAGE: &str = "micron_core::page";

pub mod error;
pub mod page;
pub mod response;

pub use crate::error::{ErrorCode, ErrorData, ErrorDetail};
pub use crate::page::{Page, PageRequest, PageResult, QueryModifier, SortFields, SortOrder};
pub use crate::response::{Envelope, PagedEnvelope};
