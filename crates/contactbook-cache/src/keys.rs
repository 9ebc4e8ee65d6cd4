//! Cache key builders for all Contactbook cache entries.

use uuid::Uuid;

/// Prefix applied to all Contactbook cache keys.
const PREFIX: &str = "contactbook";

/// Cached summary of an authenticated user.
pub fn user_by_id(user_id: Uuid) -> String {
    format!("{PREFIX}:user:{user_id}")
}

/// Revoked access token, keyed by its `jti` claim.
pub fn jwt_blocklist(jti: &str) -> String {
    format!("{PREFIX}:jwt:blocked:{jti}")
}
