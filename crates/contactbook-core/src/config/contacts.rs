//! Contact query configuration.

use serde::{Deserialize, Serialize};

/// Limits for contact listing, search, and the birthday window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsConfig {
    /// Length of the upcoming-birthday window in days (inclusive of today).
    #[serde(default = "default_birthday_window")]
    pub birthday_window_days: u32,
    /// Shortest accepted search token.
    #[serde(default = "default_search_min")]
    pub search_min_length: usize,
    /// Longest accepted search token.
    #[serde(default = "default_search_max")]
    pub search_max_length: usize,
    /// Page size when `limit` is omitted.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Largest accepted `limit`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            birthday_window_days: default_birthday_window(),
            search_min_length: default_search_min(),
            search_max_length: default_search_max(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_birthday_window() -> u32 {
    7
}

fn default_search_min() -> usize {
    2
}

fn default_search_max() -> usize {
    50
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    300
}
