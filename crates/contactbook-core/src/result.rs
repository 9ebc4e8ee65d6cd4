//! Convenience result type alias for Contactbook.

use crate::error::AppError;

/// A specialized `Result` type for Contactbook operations.
pub type AppResult<T> = Result<T, AppError>;
