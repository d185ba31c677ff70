//! Validated JSON extractor.
//!
//! [`ValidateJson`] combines JSON deserialization with `validator`-based
//! form validation and rejects with the structured `ErrorData` payload,
//! one [`ErrorDetail`] per failing field.

use axum::Json;
use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use micron_core::{ErrorData, ErrorDetail};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::response::ApiError;

/// JSON extractor that validates the deserialized form.
///
/// Works with any type implementing both `serde::Deserialize` and
/// `validator::Validate`. Deserialization failures and validation
/// failures both reject with a `BAD_REQUEST` envelope.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(form) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(ErrorData::bad_request(rejection.body_text())))?;

        form.validate().map_err(|errors| {
            tracing::warn!(errors = ?errors.field_errors(), "form validation failed");
            ApiError(ErrorData::bad_request("").with_details(error_details(&errors)))
        })?;

        Ok(Self(form))
    }
}

/// Flattens validator errors into wire detail entries.
fn error_details(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(move |error| detail_for(field.as_ref(), error))
        })
        .collect()
}

fn detail_for(field: &str, error: &ValidationError) -> ErrorDetail {
    let message = error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| default_message(error.code.as_ref()).to_owned());

    ErrorDetail {
        code: error.code.to_string(),
        target: field.to_owned(),
        message,
    }
}

/// Fallback messages for the common validation rules.
fn default_message(code: &str) -> &'static str {
    match code {
        "required" => "Can not be empty",
        "length" => "Invalid length",
        "range" => "Value out of range",
        "email" => "Must be a valid email address",
        "url" => "Must be a valid URL",
        "phone" => "Must be valid telephone or mobile phone number",
        "regex" => "Invalid format",
        _ => "Invalid value",
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct ProductForm {
        #[validate(length(min = 1, message = "Can not be empty"))]
        name: String,
        #[validate(email)]
        contact: String,
    }

    fn validate(json: &str) -> Result<ProductForm, ValidationErrors> {
        let form: ProductForm = serde_json::from_str(json).unwrap();
        form.validate().map(|()| form)
    }

    #[test]
    fn valid_form_passes() {
        let form = validate(r#"{"name":"Widget","contact":"a@b.example"}"#).unwrap();
        assert_eq!(form.name, "Widget");
    }

    #[test]
    fn failing_fields_become_details() {
        let errors = validate(r#"{"name":"","contact":"not-an-email"}"#).unwrap_err();
        let mut details = error_details(&errors);
        details.sort_by(|a, b| a.target.cmp(&b.target));

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].target, "contact");
        assert_eq!(details[0].code, "email");
        assert_eq!(details[0].message, "Must be a valid email address");
        assert_eq!(details[1].target, "name");
        assert_eq!(details[1].message, "Can not be empty");
    }
}
