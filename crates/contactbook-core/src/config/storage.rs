//! Storage and avatar configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory of the local storage provider.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Avatar processing settings.
    #[serde(default)]
    pub avatar: AvatarConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            avatar: AvatarConfig::default(),
        }
    }
}

/// Avatar upload settings, handed to the processor at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Sub-folder under `avatars/` that groups this deployment's images.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Edge length of the square output image in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
    /// Largest accepted upload in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
    /// Public URL under which the storage root is served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            size: default_size(),
            max_upload_bytes: default_max_upload(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_root_path() -> String {
    "./data/storage".to_string()
}

fn default_prefix() -> String {
    "contactbook".to_string()
}

fn default_size() -> u32 {
    250
}

fn default_max_upload() -> usize {
    5 * 1024 * 1024
}

fn default_public_base_url() -> String {
    "http://localhost:8080/static".to_string()
}
