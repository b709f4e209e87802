//! Core error types for Madcamp RS

use thiserror::Error;

/// Core error type for Madcamp operations
#[derive(Error, Debug)]
pub enum McError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl McError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// HTTP status code mapping for errors
    pub fn status_code(&self) -> u16 {
        match self {
            McError::NotFound { .. } => 404,
            McError::InvalidInput { .. } => 422,
            McError::Database(_) | McError::Internal(_) | McError::Config(_) => 500,
            McError::ExternalService { .. } => 502,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            McError::NotFound { .. } => "not_found",
            McError::InvalidInput { .. } => "invalid_input",
            McError::Database(_) => "database_error",
            McError::ExternalService { .. } => "external_service_error",
            McError::Config(_) => "configuration_error",
            McError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(McError::not_found("Project", "id", 7).status_code(), 404);
        assert_eq!(McError::invalid_input("bad date").status_code(), 422);
        assert_eq!(
            McError::ExternalService {
                service: "completion".into(),
                message: "timeout".into()
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = McError::not_found("Project", "id", 42);
        assert_eq!(err.to_string(), "Not found: Project with id=42");
    }
}
