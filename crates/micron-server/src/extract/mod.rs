//! Request extractors.

mod page_query;
mod trace_context;
mod validate_json;

pub use page_query::PageQuery;
pub use trace_context::TraceContext;
pub use validate_json::ValidateJson;
