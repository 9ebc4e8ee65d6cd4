//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use contactbook_core::config::ContactsConfig;
use contactbook_core::error::AppError;
use contactbook_core::types::PageRequest;

/// `?limit=&offset=` query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Items per page (default 10, at most 300).
    pub limit: Option<u64>,
    /// Items to skip (default 0).
    pub offset: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest`, rejecting limits outside
    /// `1..=max_page_size`.
    pub fn into_page_request(self, config: &ContactsConfig) -> Result<PageRequest, AppError> {
        let limit = self.limit.unwrap_or(config.default_page_size);
        if limit == 0 || limit > config.max_page_size {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {}",
                config.max_page_size
            )));
        }
        Ok(PageRequest::new(limit, self.offset.unwrap_or(0)))
    }
}
