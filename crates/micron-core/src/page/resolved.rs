//! Resolved page descriptors and result summaries.

use heck::ToSnakeCase;
use serde::{Deserialize, Serialize};

use super::request::lenient_int;
use super::{PageRequest, SortFields, SortOrder};
use crate::TRACING_TARGET_PAGE;

/// Page size applied when none (or an invalid one) is requested.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 500;

/// A validated, bounded slice descriptor ready to drive a storage query.
///
/// Produced by [`Page::resolve`]; all fields are trusted from that point
/// on. `number` and `offset` are 1-based and always at least 1, `size` is
/// always within `[1, MAX_PAGE_SIZE]`, and `order` only names columns the
/// caller allow-listed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page number, 1-based.
    pub number: i64,
    /// Absolute row offset, 1-based.
    pub offset: i64,
    /// Page size.
    pub size: i64,
    /// Comma-joined ORDER BY clause, empty when nothing valid was asked.
    pub order: String,
    /// Free-text search term, passed through untouched.
    pub search: String,
}

impl Page {
    /// Resolves raw request parameters into a trusted page descriptor.
    ///
    /// Resolution never fails: unparsable numbers fall back to defaults,
    /// the size is clamped to `[1, MAX_PAGE_SIZE]`, and an explicit
    /// `pageOffset` takes precedence over `pageNumber`. Sort tokens are
    /// snake_cased and kept only if `fields` allows them. Arithmetic
    /// saturates at the `i64` boundary, so no parseable input can panic.
    pub fn resolve(request: &PageRequest, fields: &SortFields) -> Self {
        let mut size = lenient_int(&request.page_size);
        let mut number = lenient_int(&request.page_number);
        let mut offset = lenient_int(&request.page_offset);

        if size <= 0 {
            size = DEFAULT_PAGE_SIZE;
        } else if size > MAX_PAGE_SIZE {
            size = MAX_PAGE_SIZE;
        }

        if number <= 0 {
            number = 1;
        }

        if offset > 0 {
            number = (offset - 1) / size + 1;
        } else {
            offset = (number - 1).saturating_mul(size).saturating_add(1);
        }

        Self {
            number,
            offset,
            size,
            order: parse_order(&request.page_order, fields),
            search: request.search.trim().to_owned(),
        }
    }

    /// Combines this page with an externally counted row total into the
    /// response-facing summary.
    ///
    /// Pure: no side effects, identical inputs give identical output.
    pub fn result(&self, total_count: i64) -> PageResult {
        let total_pages = if total_count > 0 {
            (total_count - 1) / self.size + 1
        } else {
            0
        };

        PageResult {
            page_number: self.number,
            page_offset: self.offset,
            page_size: self.size,
            total_count,
            total_pages,
            is_first: i64::from(self.number <= 1),
            is_last: i64::from(self.offset.saturating_add(self.size) > total_count),
        }
    }

    /// Describes the slice for an external storage-query component.
    pub fn modifier(&self) -> QueryModifier {
        QueryModifier {
            offset: self.offset - 1,
            limit: self.size,
            order_by: self.order.clone(),
        }
    }
}

/// Pagination summary returned to the API caller.
///
/// `is_first`/`is_last` are 0/1 integers on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// Page number, 1-based.
    pub page_number: i64,
    /// Absolute row offset, 1-based.
    pub page_offset: i64,
    /// Page size.
    pub page_size: i64,
    /// Total rows matching the query, across all pages.
    pub total_count: i64,
    /// Total number of pages.
    pub total_pages: i64,
    /// 1 when this is the first page.
    pub is_first: i64,
    /// 1 when this page reaches past the last row.
    pub is_last: i64,
}

/// Opaque slice descriptor an external storage layer applies when
/// fetching a page of rows.
///
/// `offset` here is the 0-based number of rows to skip, ready for an
/// OFFSET/LIMIT style query. `order_by` is empty when no valid sort was
/// requested.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryModifier {
    /// Rows to skip, 0-based.
    pub offset: i64,
    /// Maximum rows to return.
    pub limit: i64,
    /// Allow-listed ORDER BY clause.
    pub order_by: String,
}

impl QueryModifier {
    /// Returns whether an ORDER BY clause was requested.
    pub fn has_order(&self) -> bool {
        !self.order_by.is_empty()
    }
}

/// Builds the ORDER BY clause from a comma-separated sort spec.
///
/// Each token is `"field [direction]"`. The direction defaults to
/// descending and anything other than asc/desc (any case) is treated as
/// descending. Field names are snake_cased before the allow-list check;
/// tokens naming fields outside the list are dropped without error.
fn parse_order(raw: &str, fields: &SortFields) -> String {
    let mut clauses: Vec<String> = Vec::new();

    for token in raw.split(',') {
        let mut parts = token.split_whitespace();
        let Some(field) = parts.next() else {
            continue;
        };

        let direction = parts
            .next()
            .and_then(|d| d.parse::<SortOrder>().ok())
            .unwrap_or_default();
        let field = field.to_snake_case();

        if fields.allows(&field) {
            clauses.push(format!("{field} {direction}"));
        } else {
            tracing::debug!(
                target: TRACING_TARGET_PAGE,
                field = %field,
                "sort field not allow-listed, dropped"
            );
        }
    }

    clauses.join(", ")
}
