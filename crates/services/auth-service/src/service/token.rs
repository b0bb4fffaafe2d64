//! Session token minting and verification (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use common::{AppError, AppResult, ConfigError, JwtConfig};
use domain::{UserId, MAX_JWT_EXPIRATION_HOURS, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.user_id)
    }
}

/// Token returned after successful authentication
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// Signed JWT
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Signs and verifies session tokens with one symmetric key.
///
/// Keys are derived once at construction; the issuer is immutable after
/// that and can be shared freely between requests.
#[derive(Clone)]
pub struct TokenIssuer {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
    expires_in: i64,
}

#[derive(Error, Debug)]
enum SignError {
    #[error("token expiry is out of range")]
    ExpiryOutOfRange,

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl TokenIssuer {
    /// Build an issuer, failing early on unusable key material.
    pub fn new(config: &JwtConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let too_long = || ConfigError::ExpirationTooLong {
            max: MAX_JWT_EXPIRATION_HOURS,
            actual: config.expiration_hours,
        };
        let lifetime = Duration::try_hours(config.expiration_hours).ok_or_else(too_long)?;
        let expires_in = config
            .expiration_hours
            .checked_mul(SECONDS_PER_HOUR)
            .ok_or_else(too_long)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        let issuer = Self {
            header: Header::new(Algorithm::HS256),
            encoding_key: EncodingKey::from_secret(config.secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_bytes()),
            validation,
            lifetime,
            expires_in,
        };

        // Sign once so a broken key fails startup instead of the first login.
        issuer
            .sign(UserId::new(0))
            .map_err(|e| ConfigError::Signing(e.to_string()))?;

        Ok(issuer)
    }

    /// Mint a token asserting `user_id`.
    pub fn issue(&self, user_id: UserId) -> AppResult<IssuedToken> {
        let access_token = self
            .sign(user_id)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.expires_in,
        })
    }

    /// Check signature, algorithm and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    fn sign(&self, user_id: UserId) -> Result<String, SignError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or(SignError::ExpiryOutOfRange)?;

        let claims = Claims {
            user_id: user_id.get(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(&self.header, &claims, &self.encoding_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> TokenIssuer {
        TokenIssuer::new(&JwtConfig {
            secret: secret.to_string(),
            expiration_hours: 24,
        })
        .unwrap()
    }

    const KEY_A: &str = "key-a-0123456789abcdef0123456789ab";
    const KEY_B: &str = "key-b-0123456789abcdef0123456789ab";

    #[test]
    fn test_issue_and_verify() {
        let tokens = issuer(KEY_A);
        let issued = tokens.issue(UserId::new(42)).unwrap();

        let claims = tokens.verify(&issued.access_token).unwrap();

        assert_eq!(claims.user_id(), UserId::new(42));
        assert_eq!(claims.exp - claims.iat, 24 * SECONDS_PER_HOUR);
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 86400);
    }

    #[test]
    fn test_other_key_rejected() {
        let issued = issuer(KEY_A).issue(UserId::new(1)).unwrap();

        let result = issuer(KEY_B).verify(&issued.access_token);

        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(KEY_A.as_bytes()),
        )
        .unwrap();

        assert!(matches!(issuer(KEY_A).verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(KEY_A.as_bytes()),
        )
        .unwrap();

        assert!(matches!(issuer(KEY_A).verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(issuer(KEY_A).verify("not.a.jwt"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_weak_key_fails_construction() {
        let result = TokenIssuer::new(&JwtConfig {
            secret: "short".to_string(),
            expiration_hours: 24,
        });

        assert!(matches!(result, Err(ConfigError::WeakSecret { .. })));
    }

    #[test]
    fn test_huge_lifetime_fails_construction() {
        for hours in [3_000_000_000, 3_000_000_000_000, i64::MAX] {
            let result = TokenIssuer::new(&JwtConfig {
                secret: KEY_A.to_string(),
                expiration_hours: hours,
            });

            assert!(matches!(result, Err(ConfigError::ExpirationTooLong { .. })));
        }
    }

    #[test]
    fn test_longest_lifetime_still_signs() {
        let tokens = TokenIssuer::new(&JwtConfig {
            secret: KEY_A.to_string(),
            expiration_hours: MAX_JWT_EXPIRATION_HOURS,
        })
        .unwrap();

        let issued = tokens.issue(UserId::new(9)).unwrap();

        assert_eq!(issued.expires_in, MAX_JWT_EXPIRATION_HOURS * SECONDS_PER_HOUR);
        assert_eq!(tokens.verify(&issued.access_token).unwrap().user_id(), UserId::new(9));
    }
}
