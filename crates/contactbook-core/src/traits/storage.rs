//! Storage provider trait for pluggable file storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for file storage backends.
///
/// Paths are relative to the provider's root and use `/` separators.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write bytes to a file at the given path, replacing existing content.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;
}
