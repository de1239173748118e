//! Identity-provider JWT extraction from the `Authorization` header.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;
use jiff::Timestamp;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::decode;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{AuthKeys, Identity};

/// Verified bearer token of the current request.
///
/// Cached in the request extensions after the first extraction.
#[must_use]
#[derive(Debug, Clone)]
pub struct AuthHeader {
    auth_claims: AuthClaims,
}

impl AuthHeader {
    #[inline]
    pub const fn new(auth_claims: AuthClaims) -> Self {
        Self { auth_claims }
    }

    #[inline]
    pub const fn as_auth_claims(&self) -> &AuthClaims {
        &self.auth_claims
    }

    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.auth_claims
    }

    fn from_header(
        authorization_header: TypedHeader<Authorization<Bearer>>,
        auth_keys: &AuthKeys,
    ) -> Result<Self> {
        let auth_claims = AuthClaims::from_token(authorization_header.token(), auth_keys)?;
        Ok(Self::new(auth_claims))
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    AuthKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        let auth_keys = AuthKeys::from_ref(state);

        match AuthBearerHeader::from_request_parts(parts, state).await {
            Ok(bearer_header) => {
                let auth_header = Self::from_header(bearer_header, &auth_keys)?;
                parts.extensions.insert(auth_header.clone());
                Ok(auth_header)
            }
            Err(rejection) => {
                let error = match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                        .with_message("Authentication required")
                        .with_context("Missing Authorization header with Bearer token")
                        .with_resource("authentication"),
                    TypedHeaderRejectionReason::Error(_) => ErrorKind::MalformedAuthToken
                        .with_message("Invalid token format")
                        .with_context("Authorization header must contain a valid Bearer token")
                        .with_resource("authentication"),
                    _ => ErrorKind::InternalServerError
                        .with_message("Authentication processing failed")
                        .with_context("Unexpected error during header extraction")
                        .with_resource("authentication"),
                };
                Err(error)
            }
        }
    }
}

/// Claims of an identity-provider token.
///
/// Only `sub`, `email` and `exp` are required; names and picture seed the
/// caller's profile on first sight.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    /// Identity-provider user id.
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

impl AuthClaims {
    /// Returns the user id the token was issued for.
    #[inline]
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Returns the expiry, or `None` if it is out of range.
    pub fn expires_at(&self) -> Option<Timestamp> {
        Timestamp::from_second(self.exp).ok()
    }

    /// Returns the caller identity used for profile bootstrapping.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.sub.clone(),
            email: self.email.clone(),
            first_name: self.given_name.clone(),
            last_name: self.family_name.clone(),
            avatar_url: self.picture.clone(),
        }
    }

    fn from_token(token: &str, auth_keys: &AuthKeys) -> Result<Self> {
        let validation = auth_keys.validation();
        let claims = decode::<Self>(token, auth_keys.decoding_key(), &validation)?.claims;

        if claims.sub.trim().is_empty() {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                "JWT token validation failed: empty subject"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Authentication token is incomplete")
                .with_context("Token subject is empty"));
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = %claims.sub,
            issuer = claims.iss.as_deref(),
            "JWT token validation completed successfully"
        );

        Ok(claims)
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            error = %error,
            "JWT token rejected"
        );

        match error.kind() {
            JwtErrorKind::ExpiredSignature => ErrorKind::Unauthorized
                .with_message("Your session has expired")
                .with_context("Please sign in again to continue"),
            JwtErrorKind::InvalidToken => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is invalid")
                .with_context("The provided token format is unrecognized"),
            JwtErrorKind::InvalidSignature => ErrorKind::Unauthorized
                .with_message("Authentication token verification failed")
                .with_context("Token signature could not be verified"),
            JwtErrorKind::InvalidAlgorithm => ErrorKind::MalformedAuthToken
                .with_message("Authentication token uses unsupported format")
                .with_context("Token was signed with an incompatible algorithm"),
            JwtErrorKind::InvalidAudience => ErrorKind::Unauthorized
                .with_message("Authentication token is not valid for this service")
                .with_context("Token was issued for a different application"),
            JwtErrorKind::InvalidIssuer => ErrorKind::Unauthorized
                .with_message("Authentication token is from an untrusted source")
                .with_context("Token was not issued by the configured identity provider"),
            JwtErrorKind::MissingRequiredClaim(claim) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is incomplete")
                .with_context(format!("Token is missing required field: {claim}")),
            JwtErrorKind::Base64(_) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token format is corrupted")
                .with_context("Token contains invalid base64 encoding"),
            JwtErrorKind::Json(_) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token structure is invalid")
                .with_context("Token payload contains malformed data"),
            _ => ErrorKind::InternalServerError
                .with_message("Authentication processing failed")
                .with_context("An unexpected error occurred during token validation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn claims(exp: i64) -> AuthClaims {
        AuthClaims {
            sub: "auth0|ada".into(),
            email: "ada@example.com".into(),
            given_name: Some("Ada".into()),
            family_name: None,
            picture: None,
            iss: None,
            exp,
        }
    }

    fn keys() -> AuthKeys {
        AuthKeys::from_secret(SECRET, None, None).unwrap()
    }

    #[test]
    fn valid_token_yields_identity() {
        let keys = keys();
        let expected = claims(Timestamp::now().as_second() + 3600);
        let token = keys.sign(&expected).unwrap();

        let decoded = AuthClaims::from_token(&token, &keys).unwrap();
        assert_eq!(decoded, expected);

        let identity = decoded.identity();
        assert_eq!(identity.user_id, "auth0|ada");
        assert_eq!(identity.first_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let keys = keys();
        let token = keys
            .sign(&claims(Timestamp::now().as_second() - 3600))
            .unwrap();

        let error = AuthClaims::from_token(&token, &keys).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let other = AuthKeys::from_secret(b"fedcba9876543210fedcba9876543210", None, None).unwrap();
        let token = other
            .sign(&claims(Timestamp::now().as_second() + 3600))
            .unwrap();

        let error = AuthClaims::from_token(&token, &keys()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn garbage_is_malformed() {
        let error = AuthClaims::from_token("not-a-jwt", &keys()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedAuthToken);
    }
}
