//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    /// A field-level validation failure. Surfaced next to the offending
    /// form field, never as a 5xx.
    #[error("Validation failed on {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A unique-constraint conflict. Keyed by field like `Validation` so
    /// forms render it the same way, but distinct so callers can tell
    /// "already taken" apart from malformed input.
    #[error("Conflict on {field}: {message}")]
    Conflict { field: &'static str, message: String },

    /// Edit/delete permission denied for the acting user.
    #[error("Permission denied")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::validation(field, "This field is required.")
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
