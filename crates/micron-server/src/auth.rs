//! Token verification against a remote JSON Web Key Set.
//!
//! Identity providers publish their signing keys at a JWKS endpoint;
//! [`JwksClient`] fetches that set, picks the key named by the token
//! header's `kid`, and verifies the RS256 signature and expiry. The set
//! is fetched per call; callers that verify at high volume should cache
//! in front of this client.

use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::de::DeserializeOwned;
use url::Url;

use crate::TRACING_TARGET_AUTH;

/// Errors produced while verifying a token against a JWKS endpoint.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The token is not a structurally valid JWT.
    #[error("token header could not be parsed")]
    MalformedToken(#[source] jsonwebtoken::errors::Error),

    /// The token header names no `kid`, so no key can be selected.
    #[error("token header carries no key id")]
    MissingKeyId,

    /// The JWKS endpoint could not be fetched or returned a bad payload.
    #[error("failed to fetch JWK set")]
    JwksFetch(#[from] reqwest::Error),

    /// No key in the published set matches the token's `kid`.
    #[error("no key in the JWK set matches kid {0:?}")]
    UnknownKeyId(String),

    /// The matching JWK could not be turned into a decoding key.
    #[error("JWK is not usable as a decoding key")]
    UnusableKey(#[source] jsonwebtoken::errors::Error),

    /// Signature or claim validation failed.
    #[error("token verification failed")]
    Verification(#[source] jsonwebtoken::errors::Error),
}

/// Verifies RS256 tokens against a remote JWK set.
#[derive(Debug, Clone)]
pub struct JwksClient {
    http: reqwest::Client,
    jwks_uri: Url,
}

impl JwksClient {
    /// Creates a client for the given JWKS endpoint.
    pub fn new(jwks_uri: Url) -> Self {
        Self::with_client(reqwest::Client::new(), jwks_uri)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, jwks_uri: Url) -> Self {
        Self { http, jwks_uri }
    }

    /// Verifies `token` and returns its deserialized claims.
    ///
    /// Checks the RS256 signature with the published key matching the
    /// token's `kid`, and the `exp` claim. Audience and issuer are not
    /// checked here: this library serves many services behind one
    /// identity provider, so those checks belong to the caller.
    pub async fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, AuthError> {
        let header = decode_header(token).map_err(AuthError::MalformedToken)?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let jwks = self.fetch_jwks().await?;
        let jwk = key_for(&jwks, &kid)?;
        let key = DecodingKey::from_jwk(jwk).map_err(AuthError::UnusableKey)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        let data = decode::<T>(token, &key, &validation).map_err(|error| {
            tracing::warn!(
                target: TRACING_TARGET_AUTH,
                kid = %kid,
                error = %error,
                "token verification failed"
            );
            AuthError::Verification(error)
        })?;

        tracing::debug!(target: TRACING_TARGET_AUTH, kid = %kid, "token verified");
        Ok(data.claims)
    }

    /// Fetches the current key set from the JWKS endpoint.
    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .http
            .get(self.jwks_uri.clone())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

/// Selects the key matching `kid` from a fetched set.
fn key_for<'a>(set: &'a JwkSet, kid: &str) -> Result<&'a Jwk, AuthError> {
    set.find(kid)
        .ok_or_else(|| AuthError::UnknownKeyId(kid.to_owned()))
}

#[cfg(test)]
mod tests {
    use base64::prelude::*;

    use super::*;

    // RSA public key from RFC 7517 appendix A.1, good enough for key
    // selection and conversion tests; no signatures are checked with it.
    const JWKS_JSON: &str = r#"{"keys":[{
        "kty":"RSA",
        "kid":"2011-04-29",
        "use":"sig",
        "alg":"RS256",
        "n":"0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw",
        "e":"AQAB"
    }]}"#;

    fn jwks() -> JwkSet {
        serde_json::from_str(JWKS_JSON).unwrap()
    }

    fn unsigned_token(header_json: &str) -> String {
        let header = BASE64_URL_SAFE_NO_PAD.encode(header_json);
        let payload = BASE64_URL_SAFE_NO_PAD.encode("{}");
        format!("{header}.{payload}.c2ln")
    }

    #[test]
    fn key_lookup_by_kid() {
        let set = jwks();

        assert!(key_for(&set, "2011-04-29").is_ok());
        assert!(matches!(
            key_for(&set, "other"),
            Err(AuthError::UnknownKeyId(kid)) if kid == "other"
        ));
    }

    #[test]
    fn selected_key_converts_to_decoding_key() {
        let set = jwks();
        let jwk = key_for(&set, "2011-04-29").unwrap();
        assert!(DecodingKey::from_jwk(jwk).is_ok());
    }

    #[test]
    fn malformed_token_is_rejected_up_front() {
        assert!(decode_header("not-a-jwt").is_err());
        assert!(decode_header("a.b.c").is_err());
    }

    #[test]
    fn token_without_kid_has_no_key_to_select() {
        let token = unsigned_token(r#"{"alg":"RS256","typ":"JWT"}"#);
        let header = decode_header(&token).unwrap();
        assert_eq!(header.kid, None);
    }

    #[test]
    fn bad_signature_fails_verification() {
        let set = jwks();
        let key = DecodingKey::from_jwk(key_for(&set, "2011-04-29").unwrap()).unwrap();
        let token = unsigned_token(r#"{"alg":"RS256","typ":"JWT","kid":"2011-04-29"}"#);

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.validate_aud = false;

        let result = decode::<serde_json::Value>(&token, &key, &validation);
        assert!(result.is_err());
    }
}
