//! Result type alias for Madcamp operations

use crate::error::McError;

/// Standard Result type for Madcamp operations
pub type McResult<T> = Result<T, McError>;
