//! Verification keys for identity-provider bearer tokens.
//!
//! Tokens are issued by an external identity provider and signed with a
//! shared HS256 secret; this server only verifies them.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::TRACING_TARGET_AUTHENTICATION as TRACING_TARGET;
use crate::{Error, Result};

/// Keys and claim expectations used to verify bearer tokens.
#[derive(Clone)]
pub struct AuthKeys {
    inner: Arc<AuthKeysInner>,
}

struct AuthKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    issuer: Option<String>,
    audience: Option<String>,
}

impl AuthKeys {
    /// Creates keys from the shared signing secret.
    pub fn from_secret(
        secret: &[u8],
        issuer: Option<String>,
        audience: Option<String>,
    ) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::auth("JWT secret cannot be empty"));
        }

        tracing::info!(
            target: TRACING_TARGET,
            has_issuer = issuer.is_some(),
            has_audience = audience.is_some(),
            "Authentication keys loaded",
        );

        let inner = AuthKeysInner {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
            issuer,
            audience,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns a reference to the decoding key.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns the token validation rules: HS256, expiry, and the configured
    /// issuer and audience.
    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        if let Some(issuer) = &self.inner.issuer {
            validation.set_issuer(&[issuer]);
        }

        match &self.inner.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        validation
    }

    /// Signs `claims` with the shared secret.
    ///
    /// Used by development tooling that stands in for the identity provider.
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String> {
        let header = Header::new(Algorithm::HS256);
        jsonwebtoken::encode(&header, claims, &self.inner.encoding_key)
            .map_err(|e| Error::auth("Failed to sign token").with_source(e))
    }
}

impl fmt::Debug for AuthKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthKeys")
            .field("issuer", &self.inner.issuer)
            .field("audience", &self.inner.audience)
            .finish_non_exhaustive()
    }
}
