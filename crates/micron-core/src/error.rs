//! Wire error taxonomy shared by all micron services.
//!
//! [`ErrorData`] is the `error` object of the response envelope: a stable
//! machine-readable code, a human-readable message, and optional
//! per-field details. It is payload data, not a Rust error type; fallible
//! code paths keep their own `thiserror` enums and convert at the edge.

use serde::{Deserialize, Serialize};

/// Stable machine-readable error codes.
///
/// Codes are serialized SCREAMING_SNAKE_CASE and are part of the API
/// contract; renaming a variant is a breaking change for every consumer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    InternalServerError,
    InvalidArgument,
    OutOfRange,
    Unauthenticated,
    AccessDenied,
    NotFound,
    Aborted,
    AlreadyExists,
    ResourceExhausted,
    Cancelled,
    DataLoss,
    Unknown,
    NotImplemented,
    Unavailable,
    DeadlineExceeded,
    ReferenceIntegrityFail,
}

impl ErrorCode {
    /// Returns the default user-facing message for this code.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest | Self::InvalidArgument => "Bad Request",
            Self::InternalServerError => "Internal server error",
            Self::OutOfRange => "Value out of range",
            Self::Unauthenticated => "Authentication required",
            Self::AccessDenied => "Access Denied",
            Self::NotFound => "Requested resource not found",
            Self::Aborted => "Operation aborted",
            Self::AlreadyExists => "Resource already exists",
            Self::ResourceExhausted => "Resource exhausted",
            Self::Cancelled => "Operation cancelled",
            Self::DataLoss => "Data loss detected",
            Self::Unknown => "Unknown error",
            Self::NotImplemented => "Not implemented",
            Self::Unavailable => "Service unavailable",
            Self::DeadlineExceeded => "Deadline exceeded",
            Self::ReferenceIntegrityFail => "Reference integrity violation",
        }
    }

    /// Returns the HTTP status this code maps to.
    pub const fn http_status(self) -> u16 {
        match self {
            Self::BadRequest | Self::InvalidArgument | Self::OutOfRange | Self::Cancelled => 400,
            Self::Unauthenticated => 401,
            Self::AccessDenied => 403,
            Self::NotFound => 404,
            Self::Aborted | Self::AlreadyExists | Self::ReferenceIntegrityFail => 409,
            Self::ResourceExhausted => 429,
            Self::InternalServerError | Self::DataLoss | Self::Unknown => 500,
            Self::NotImplemented => 501,
            Self::Unavailable => 503,
            Self::DeadlineExceeded => 504,
        }
    }

    /// Classifies a database driver message into a wire code.
    ///
    /// Matches on the message prefixes the MySQL driver and the ORM emit
    /// for duplicate keys, foreign-key violations, and missing rows.
    /// Anything unrecognized is an internal error.
    pub fn from_db_message(message: &str) -> Self {
        if message.starts_with("Error 1062: Duplicate entry") {
            Self::AlreadyExists
        } else if message.starts_with("Error 1452: Cannot add or update a child") {
            Self::ReferenceIntegrityFail
        } else if message.starts_with("record not found") {
            Self::NotFound
        } else {
            Self::InternalServerError
        }
    }
}

/// Structured error payload of the response envelope.
#[must_use = "error payloads do nothing unless serialized"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorData {
    /// Machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable message safe for client display.
    pub message: String,
    /// Per-field details for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

/// One field-level entry of a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// Validation rule that failed, e.g. `required`.
    pub code: String,
    /// Field the failure relates to.
    pub target: String,
    /// Human-readable message for this field.
    pub message: String,
}

impl ErrorData {
    /// Creates an error payload with the default message for `code`.
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_owned(),
            details: Vec::new(),
        }
    }

    /// Replaces the message; an empty message keeps the default.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.is_empty() {
            self.message = message;
        }
        self
    }

    /// Appends a field-level detail entry.
    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.details.push(detail);
        self
    }

    /// Appends several field-level detail entries.
    pub fn with_details(mut self, details: impl IntoIterator<Item = ErrorDetail>) -> Self {
        self.details.extend(details);
        self
    }

    /// Shorthand for a `BAD_REQUEST` payload.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest).with_message(message)
    }

    /// Shorthand for an `ACCESS_DENIED` payload.
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AccessDenied).with_message(message)
    }

    /// Shorthand for a `NOT_FOUND` payload.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound).with_message(message)
    }

    /// Shorthand for an `INTERNAL_SERVER_ERROR` payload.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError).with_message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_wire_names() {
        assert_eq!(ErrorCode::BadRequest.as_ref(), "BAD_REQUEST");
        assert_eq!(
            ErrorCode::ReferenceIntegrityFail.as_ref(),
            "REFERENCE_INTEGRITY_FAIL"
        );

        let json = serde_json::to_string(&ErrorCode::AccessDenied).unwrap();
        assert_eq!(json, r#""ACCESS_DENIED""#);
    }

    #[test]
    fn empty_message_keeps_default() {
        let error = ErrorData::access_denied("");
        assert_eq!(error.message, "Access Denied");

        let error = ErrorData::not_found("no such product");
        assert_eq!(error.message, "no such product");
    }

    #[test]
    fn details_skipped_when_empty() {
        let json = serde_json::to_string(&ErrorData::bad_request("")).unwrap();
        assert!(!json.contains("details"));

        let error = ErrorData::bad_request("").with_detail(ErrorDetail {
            code: "required".into(),
            target: "name".into(),
            message: "Can not be empty".into(),
        });
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["details"][0]["target"], "name");
    }

    #[test]
    fn db_message_classification() {
        assert_eq!(
            ErrorCode::from_db_message("Error 1062: Duplicate entry 'a' for key 'name'"),
            ErrorCode::AlreadyExists
        );
        assert_eq!(
            ErrorCode::from_db_message("Error 1452: Cannot add or update a child row"),
            ErrorCode::ReferenceIntegrityFail
        );
        assert_eq!(
            ErrorCode::from_db_message("record not found"),
            ErrorCode::NotFound
        );
        assert_eq!(
            ErrorCode::from_db_message("deadlock detected"),
            ErrorCode::InternalServerError
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ErrorCode::BadRequest.http_status(), 400);
        assert_eq!(ErrorCode::AccessDenied.http_status(), 403);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::InternalServerError.http_status(), 500);
    }
}
