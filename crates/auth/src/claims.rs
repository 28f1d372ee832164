use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockdesk_core::UserId;

use crate::Role;

/// Token claims model.
///
/// This is the set of claims the backend embeds in its bearer tokens. The
/// client decodes the payload without verifying the signature — it never
/// holds the signing secret — so these values are trusted only as far as
/// the backend re-validates every request anyway. Any decode or shape
/// mismatch is treated as an invalid session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,

    /// Set when the account still carries a system-issued password.
    #[serde(default)]
    pub temporal_password: Option<bool>,

    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// Expiry check: expired once `now` reaches `exp * 1000` milliseconds.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.exp.saturating_mul(1000)
    }

    /// Snapshot the claims into the in-memory/persisted identity shape.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            temporary_password: self.temporal_password.unwrap_or(false),
        }
    }
}

/// Decoded identity as held in memory and persisted alongside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub temporary_password: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Decode the payload of a bearer token without signature verification.
///
/// Fails closed: a payload that does not match [`TokenClaims`] (missing
/// `exp` included) is `Malformed`, which callers treat the same as expired.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.set_required_spec_claims::<&str>(&[]);

    let data = jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| TokenError::Malformed(e.to_string()))?;

    Ok(data.claims)
}

/// Decode and check expiry in one step.
pub fn validate_claims(token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
    let claims = decode_claims(token)?;
    if claims.is_expired(now) {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    use super::*;

    fn mint(claims: &TokenClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("failed to encode token")
    }

    fn claims_expiring_at(exp: DateTime<Utc>) -> TokenClaims {
        TokenClaims {
            id: UserId::new(3),
            username: "mvega".to_string(),
            email: "mvega@example.com".to_string(),
            role: Role::Admin,
            temporal_password: Some(false),
            exp: exp.timestamp(),
        }
    }

    #[test]
    fn decodes_claims_without_knowing_the_secret() {
        let claims = claims_expiring_at(Utc::now() + Duration::minutes(30));
        let token = mint(&claims);

        let decoded = decode_claims(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn future_exp_validates() {
        let now = Utc::now();
        let token = mint(&claims_expiring_at(now + Duration::minutes(10)));

        let claims = validate_claims(&token, now).unwrap();
        assert!(!claims.is_expired(now));
    }

    #[test]
    fn past_exp_is_expired() {
        let now = Utc::now();
        let token = mint(&claims_expiring_at(now - Duration::minutes(1)));

        assert_eq!(validate_claims(&token, now), Err(TokenError::Expired));
    }

    #[test]
    fn exp_boundary_counts_as_expired() {
        let now = Utc::now();
        let claims = claims_expiring_at(now);
        // now >= exp * 1000, so the exact boundary second is already expired.
        assert!(claims.is_expired(DateTime::from_timestamp(claims.exp, 0).unwrap()));
    }

    #[test]
    fn garbage_token_is_malformed() {
        assert!(matches!(
            decode_claims("definitely.not.a-jwt"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn payload_missing_exp_is_malformed() {
        // Mint a token whose payload lacks the claims shape we require.
        #[derive(Serialize)]
        struct Partial {
            username: String,
        }
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                username: "mvega".to_string(),
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(decode_claims(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn missing_temporal_password_flag_defaults_to_false() {
        let mut claims = claims_expiring_at(Utc::now() + Duration::minutes(5));
        claims.temporal_password = None;

        let identity = decode_claims(&mint(&claims)).unwrap().identity();
        assert!(!identity.temporary_password);
    }
}
