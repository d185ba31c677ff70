//! Raw pagination request parameters.

use serde::{Deserialize, Serialize};

/// Pagination parameters exactly as they arrive on the query string.
///
/// Every field is an untrusted string; resolution into a [`Page`] applies
/// defaults, bounds, and the sort allow-list. Missing parameters
/// deserialize to empty strings.
///
/// [`Page`]: super::Page
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Requested page number, 1-based.
    #[serde(default, rename = "pageNumber")]
    pub page_number: String,
    /// Requested absolute row offset, 1-based.
    /// Takes precedence over `page_number` when supplied.
    #[serde(default, rename = "pageOffset")]
    pub page_offset: String,
    /// Requested page size.
    #[serde(default, rename = "pageSize")]
    pub page_size: String,
    /// Comma-separated sort spec, each token `"field [asc|desc]"`.
    #[serde(default, rename = "pageOrder")]
    pub page_order: String,
    /// Free-text search term.
    #[serde(default, rename = "q")]
    pub search: String,
}

/// Parses an integer parameter leniently: anything unparsable is `0`,
/// which downstream resolution replaces with the default.
pub(super) fn lenient_int(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_int_parses_numbers() {
        assert_eq!(lenient_int("25"), 25);
        assert_eq!(lenient_int(" 7 "), 7);
        assert_eq!(lenient_int("-3"), -3);
    }

    #[test]
    fn lenient_int_defaults_garbage_to_zero() {
        assert_eq!(lenient_int(""), 0);
        assert_eq!(lenient_int("abc"), 0);
        assert_eq!(lenient_int("12abc"), 0);
        assert_eq!(lenient_int("9999999999999999999999"), 0);
    }

    #[test]
    fn request_deserializes_from_wire_names() {
        let request: PageRequest = serde_json::from_str(
            r#"{"pageNumber":"2","pageSize":"10","pageOrder":"name asc","q":"widget"}"#,
        )
        .unwrap();

        assert_eq!(request.page_number, "2");
        assert_eq!(request.page_offset, "");
        assert_eq!(request.page_size, "10");
        assert_eq!(request.page_order, "name asc");
        assert_eq!(request.search, "widget");
    }
}
