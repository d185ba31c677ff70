//! Pagination parsing and ORDER BY allow-listing.
//!
//! A [`PageRequest`] carries the raw, attacker-controlled query-parameter
//! strings. [`Page::resolve`] turns it into a validated, bounded slice
//! descriptor; [`Page::result`] combines the descriptor with a row count
//! into the response-facing [`PageResult`]; [`Page::modifier`] describes
//! the slice for an external storage layer.
//!
//! Resolution is infallible. Malformed or out-of-range input degrades to
//! defaults rather than failing the request.

mod request;
mod resolved;

use std::collections::BTreeSet;

pub use request::PageRequest;
pub use resolved::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageResult, QueryModifier};
use serde::{Deserialize, Serialize};

/// Sort order direction.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SortOrder {
    /// Ascending order (A-Z, oldest first, smallest first).
    Asc,
    /// Descending order (Z-A, newest first, largest first).
    #[default]
    Desc,
}

/// Allow-list of column names a caller may sort by.
///
/// The list is an explicit per-entity parameter, not module state: each
/// endpoint passes the columns its storage query can legally order by.
/// Fields outside the list are dropped silently during resolution, which
/// keeps arbitrary columns out of the generated ORDER BY clause.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SortFields(BTreeSet<String>);

impl SortFields {
    /// Columns every entity is assumed to have when no list is supplied.
    pub const DEFAULT_FIELDS: [&'static str; 5] =
        ["id", "name", "code", "created_at", "updated_at"];

    /// Creates an allow-list from snake_case column names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }

    /// Returns whether sorting by `field` is permitted.
    ///
    /// An empty list falls back to [`Self::DEFAULT_FIELDS`].
    pub fn allows(&self, field: &str) -> bool {
        if self.0.is_empty() {
            Self::DEFAULT_FIELDS.contains(&field)
        } else {
            self.0.contains(field)
        }
    }
}

impl<S: Into<String>> FromIterator<S> for SortFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_display() {
        assert_eq!(SortOrder::Asc.to_string(), "ASC");
        assert_eq!(SortOrder::Desc.to_string(), "DESC");
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!("asc".parse(), Ok(SortOrder::Asc));
        assert_eq!("DESC".parse(), Ok(SortOrder::Desc));
        assert_eq!("Desc".parse(), Ok(SortOrder::Desc));
        assert!("descending".parse::<SortOrder>().is_err());
    }

    #[test]
    fn sort_fields_explicit_list() {
        let fields = SortFields::new(["name", "created_at"]);
        assert!(fields.allows("name"));
        assert!(!fields.allows("id"));
        assert!(!fields.allows("secret_field"));
    }

    #[test]
    fn sort_fields_empty_falls_back_to_defaults() {
        let fields = SortFields::default();
        assert!(fields.allows("id"));
        assert!(fields.allows("updated_at"));
        assert!(!fields.allows("password"));
    }
}
