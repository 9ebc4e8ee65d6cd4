//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use contactbook_core::config::AuthConfig;
use contactbook_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Seconds until the access token expires.
    pub fn expires_in(&self) -> i64 {
        (self.access_expires_at - Utc::now()).num_seconds().max(0)
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: chrono::Duration::minutes(config.jwt_access_ttl_minutes as i64),
            refresh_ttl: chrono::Duration::hours(config.jwt_refresh_ttl_hours as i64),
        }
    }

    /// Access token lifetime.
    pub fn access_ttl(&self) -> std::time::Duration {
        self.access_ttl.to_std().unwrap_or_default()
    }

    /// Generates a new access + refresh token pair for the given user.
    pub fn generate_token_pair(&self, user_id: Uuid, email: &str) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_expires_at = now + self.access_ttl;
        let refresh_expires_at = now + self.refresh_ttl;

        let access_token = self.sign(user_id, email, now, access_expires_at, TokenType::Access)?;
        let refresh_token =
            self.sign(user_id, email, now, refresh_expires_at, TokenType::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn sign(
        &self,
        user_id: Uuid,
        email: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        token_type: TokenType,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {token_type:?} token: {e}")))
    }
}
