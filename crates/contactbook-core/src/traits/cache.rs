//! Key-value cache seam.
//!
//! Contactbook caches two things: the `jti` of logged-out access tokens
//! (presence only) and the authenticated user's summary, both with a TTL no
//! longer than the access token's lifetime.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// String cache with per-entry expiry, backed by moka or Redis.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// `None` for missing and expired keys alike.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Missing keys are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Decode a JSON value stored with [`set_json`](Self::set_json).
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        let Some(raw) = self.get(key).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        self.set(key, &serde_json::to_string(value)?, ttl).await
    }

    async fn health_check(&self) -> AppResult<bool>;
}
