//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the user identifier. Nothing is
//! persisted: validity is recomputed from the signed payload on every call.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use notelink_core::UserId;
use serde::{Deserialize, Serialize};

/// JWT claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID (subject).
    pub sub: UserId,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration time (unix timestamp).
    pub exp: i64,
}

/// Token failures.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signing failed. Not expected under a valid configuration.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// The token could not be parsed.
    #[error("invalid token: {0}")]
    Invalid(String),

    /// The token's expiry is at or before the current time.
    #[error("token expired")]
    Expired,

    /// The signature does not match the configured secret.
    #[error("token signature mismatch")]
    InvalidSignature,
}

/// Issues and verifies signed, time-limited identity tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    /// Create a token service signing with `secret`, issuing tokens valid for
    /// `expiry_hours`.
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against our own clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime: i64::try_from(expiry_hours)
                .ok()
                .and_then(Duration::try_hours)
                .unwrap_or(Duration::MAX),
        }
    }

    /// Token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for `user_id`, valid from now.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token for `user_id` as if the current time were `now`.
    pub fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let expires_at = now.checked_add_signed(self.lifetime).ok_or_else(|| {
            TokenError::Signing(format!("token lifetime {} overflows the clock", self.lifetime))
        })?;
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its subject.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the clock value `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
