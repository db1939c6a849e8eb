//! HS256 token issuing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};
use crate::principal::Principal;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to encode token")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token")]
    Decode(#[source] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verifies a bearer token into claims.
///
/// The transport layer owns header extraction; implementations own signature
/// verification and claim validation.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Symmetric HS256 token issuer and validator.
pub struct Hs256JwtValidator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl Hs256JwtValidator {
    const DEFAULT_TTL_MINUTES: i64 = 60;

    pub fn new(secret: Vec<u8>) -> Self {
        Self::with_ttl(secret, Duration::minutes(Self::DEFAULT_TTL_MINUTES))
    }

    pub fn with_ttl(secret: Vec<u8>, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            ttl,
        }
    }

    /// Issue a signed token carrying the principal's id, username, and role.
    pub fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = JwtClaims {
            sub: principal.id,
            username: principal.username.clone(),
            role: principal.role,
            issued_at: now,
            expires_at: now + self.ttl,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        // Claim timestamps are RFC 3339 strings, so jsonwebtoken's numeric
        // `exp` handling does not apply; `validate_claims` owns the window.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(TokenError::Decode)?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::PrincipalId;
    use crate::roles::Role;

    fn principal() -> Principal {
        Principal {
            id: PrincipalId::new(),
            username: "jsmith".to_string(),
            role: Role::Manager,
        }
    }

    #[test]
    fn issue_then_validate_round_trips_the_claims() {
        let validator = Hs256JwtValidator::new(b"test-secret".to_vec());
        let principal = principal();
        let now = Utc::now();

        let token = validator.issue(&principal, now).unwrap();
        let claims = validator.validate(&token, now).unwrap();

        assert_eq!(claims.sub, principal.id);
        assert_eq!(claims.username, principal.username);
        assert_eq!(claims.role, principal.role);
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let issuer = Hs256JwtValidator::new(b"secret-a".to_vec());
        let validator = Hs256JwtValidator::new(b"secret-b".to_vec());
        let now = Utc::now();

        let token = issuer.issue(&principal(), now).unwrap();
        let err = validator.validate(&token, now).unwrap_err();
        assert!(matches!(err, TokenError::Decode(_)));
    }

    #[test]
    fn rejects_an_expired_token() {
        let validator =
            Hs256JwtValidator::with_ttl(b"test-secret".to_vec(), Duration::minutes(10));
        let issued = Utc::now() - Duration::hours(1);

        let token = validator.issue(&principal(), issued).unwrap();
        let err = validator.validate(&token, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            TokenError::Claims(TokenValidationError::Expired)
        ));
    }

    #[test]
    fn rejects_garbage_input() {
        let validator = Hs256JwtValidator::new(b"test-secret".to_vec());
        let err = validator.validate("not-a-token", Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::Decode(_)));
    }
}
