//! Convenience result type alias for ClassVault.

use crate::error::AppError;

/// A specialized `Result` type for ClassVault operations.
pub type AppResult<T> = Result<T, AppError>;
