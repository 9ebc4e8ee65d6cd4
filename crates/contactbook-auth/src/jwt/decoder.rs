//! JWT token validation and blocklist checking.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use uuid::Uuid;

use contactbook_cache::keys;
use contactbook_cache::provider::CacheManager;
use contactbook_core::config::AuthConfig;
use contactbook_core::error::AppError;
use contactbook_core::traits::CacheProvider;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens and checks blocklist status.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    cache: Arc<CacheManager>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, cache: Arc<CacheManager>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            cache,
        }
    }

    /// Decodes an access token, rejecting refresh tokens and revoked `jti`s.
    pub async fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_typed(token, TokenType::Access)?;

        if self.is_blocklisted(&claims.jti).await? {
            return Err(AppError::authentication("Token has been revoked"));
        }

        Ok(claims)
    }

    /// Decodes a refresh token. Revocation of refresh tokens is tracked on
    /// the user record, not in the blocklist.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Refresh)
    }

    fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication("Could not validate credentials"),
            })?;

        if claims.token_type != expected {
            return Err(AppError::authentication("Invalid scope for token"));
        }
        Ok(claims)
    }

    async fn is_blocklisted(&self, jti: &Uuid) -> Result<bool, AppError> {
        self.cache.exists(&keys::jwt_blocklist(&jti.to_string())).await
    }

    /// Revokes a token id for the rest of its lifetime.
    pub async fn blocklist_token(&self, jti: Uuid, remaining_ttl_seconds: u64) -> Result<(), AppError> {
        let ttl = Duration::from_secs(remaining_ttl_seconds.max(60));
        self.cache
            .set(&keys::jwt_blocklist(&jti.to_string()), "revoked", ttl)
            .await
    }
}
