//! Lenient pagination query extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use micron_core::PageRequest;

/// Extracts the raw [`PageRequest`] from the query string.
///
/// Pagination is best-effort and never blocks a request: a missing or
/// unparsable query string yields the default (empty) request, which
/// resolution then fills with defaults. Other query parameters on the
/// same request are ignored.
#[must_use]
#[derive(Debug, Default, Clone, Deref, DerefMut, From)]
pub struct PageQuery(pub PageRequest);

impl PageQuery {
    /// Returns the inner raw request.
    #[inline]
    pub fn into_inner(self) -> PageRequest {
        self.0
    }
}

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request = parts
            .uri
            .query()
            .and_then(|query| serde_urlencoded::from_str(query).ok())
            .unwrap_or_default();

        Ok(Self(request))
    }
}
