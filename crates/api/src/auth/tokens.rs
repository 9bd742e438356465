//! Bearer tokens handed out after a successful passcode check.
//!
//! The access token is a short-lived HS256 JWT naming the identity. It does
//! not carry the role; admin checks read the profile row instead, so a role
//! change applies on the next request. The refresh token is 32 random bytes
//! in hex and only its digest is stored in `sessions`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use storefront_core::types::UserId;
use uuid::Uuid;

use super::sha256_hex;
use crate::config::env_or;

/// Payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: UserId,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_ttl_mins: i64,
    pub refresh_ttl_days: i64,
}

impl TokenConfig {
    /// Reads `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (15) and
    /// `JWT_REFRESH_EXPIRY_DAYS` (7).
    ///
    /// # Panics
    ///
    /// When the secret is missing or blank.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.trim().is_empty(), "JWT_SECRET must be set");

        Self {
            secret,
            access_ttl_mins: env_or("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_ttl_days: env_or("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    /// Access token lifetime as reported to clients.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_mins * 60
    }

    /// Expiry stamped on a session row created now.
    pub fn refresh_expires_at(&self) -> DateTime<Utc> {
        Utc::now() + Duration::days(self.refresh_ttl_days)
    }

    /// Sign a fresh access token for `user_id`.
    pub fn issue_access(
        &self,
        user_id: UserId,
        email: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let issued = Utc::now();
        let claims = AccessClaims {
            sub: user_id,
            email: email.to_owned(),
            iat: issued.timestamp(),
            exp: (issued + Duration::minutes(self.access_ttl_mins)).timestamp(),
            jti: Uuid::new_v4(),
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Verify signature and expiry, returning the claims.
    pub fn decode_access(&self, token: &str) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

/// A newly minted refresh token and the digest to persist for it.
#[derive(Debug)]
pub struct RefreshToken {
    pub token: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let bytes: [u8; 32] = rand::rng().random();
        let token: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let hash = hash_refresh_token(&token);
        Self { token, hash }
    }
}

/// Digest under which a refresh token is looked up.
pub fn hash_refresh_token(token: &str) -> String {
    sha256_hex(&[token.as_bytes()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TokenConfig {
        TokenConfig {
            secret: "unit-test-signing-secret".into(),
            access_ttl_mins: 15,
            refresh_ttl_days: 7,
        }
    }

    #[test]
    fn issued_token_decodes_to_same_identity() {
        let config = config();
        let user_id = Uuid::now_v7();
        let token = config.issue_access(user_id, "owner@shop.pk").unwrap();

        let claims = config.decode_access(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "owner@shop.pk");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn stale_token_is_rejected() {
        let config = config();
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: Uuid::now_v7(),
            email: "late@shop.pk".into(),
            iat: now - 3600,
            exp: now - 600,
            jti: Uuid::new_v4(),
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(config.decode_access(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = config().issue_access(Uuid::now_v7(), "a@shop.pk").unwrap();
        let other = TokenConfig {
            secret: "a-different-secret".into(),
            ..config()
        };
        assert!(other.decode_access(&token).is_err());
    }

    #[test]
    fn refresh_token_is_stored_by_digest() {
        let refresh = RefreshToken::generate();
        assert_eq!(refresh.token.len(), 64);
        assert_ne!(refresh.token, refresh.hash);
        assert_eq!(refresh.hash, hash_refresh_token(&refresh.token));
        assert_ne!(RefreshToken::generate().token, refresh.token);
    }
}
