//! Response envelope payload shapes.
//!
//! These are plain serde types; the axum responders that fill them in and
//! attach HTTP status codes live in `micron-server`. Every API response
//! is one of these envelopes so that clients can rely on a uniform
//! `status`/`data`/`error`/`requestId` layout.

use serde::{Deserialize, Serialize};

use crate::error::ErrorData;
use crate::page::PageResult;

/// Standard response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// HTTP status, mirrored into the body.
    pub status: u16,
    /// Response payload, omitted on errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error payload, omitted on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorData>,
    /// Trace id of the request this envelope answers.
    pub request_id: String,
}

impl<T> Envelope<T> {
    /// Creates a success envelope around `data`.
    pub fn data(status: u16, data: T, request_id: impl Into<String>) -> Self {
        Self {
            status,
            data: Some(data),
            error: None,
            request_id: request_id.into(),
        }
    }

    /// Creates an error envelope around `error`.
    pub fn error(error: ErrorData, request_id: impl Into<String>) -> Self {
        Self {
            status: error.code.http_status(),
            data: None,
            error: Some(error),
            request_id: request_id.into(),
        }
    }
}

/// Response envelope for paginated listings.
///
/// Identical to [`Envelope`] plus the pagination summary under the
/// `_pagination` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedEnvelope<T> {
    /// HTTP status, mirrored into the body.
    pub status: u16,
    /// Response payload, omitted on errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error payload, omitted on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorData>,
    /// Pagination summary for the returned slice.
    #[serde(rename = "_pagination")]
    pub pagination: PageResult,
    /// Trace id of the request this envelope answers.
    pub request_id: String,
}

impl<T> PagedEnvelope<T> {
    /// Creates a success envelope around one page of `data`.
    pub fn data(status: u16, data: T, pagination: PageResult, request_id: impl Into<String>) -> Self {
        Self {
            status,
            data: Some(data),
            error: None,
            pagination,
            request_id: request_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::page::{Page, PageRequest, SortFields};

    #[test]
    fn success_envelope_omits_error() {
        let envelope = Envelope::data(200, vec![1, 2, 3], "3b6272b9-1ef1-45e0");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["status"], 200);
        assert_eq!(json["data"][2], 3);
        assert_eq!(json["requestId"], "3b6272b9-1ef1-45e0");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_envelope_takes_status_from_code() {
        let envelope = Envelope::<()>::error(ErrorData::new(ErrorCode::NotFound), "rid");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["status"], 404);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn paged_envelope_nests_pagination() {
        let page = Page::resolve(&PageRequest::default(), &SortFields::default());
        let envelope = PagedEnvelope::data(200, vec!["a"], page.result(1), "rid");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["_pagination"]["totalCount"], 1);
        assert_eq!(json["_pagination"]["isLast"], 1);
    }
}
