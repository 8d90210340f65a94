//! Domain-level error types.

use thiserror::Error;

/// A client payload broke one or more required-field rules.
///
/// Every violation is collected, so a single response can tell the client
/// about all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing or empty required field(s): {}", .violations.join(", "))]
pub struct ValidationError {
    violations: Vec<String>,
}

impl ValidationError {
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }

    /// The offending field paths, e.g. `author.lastName`.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Request path id ({path_id}) and request body id ({body_id}) must match")]
    Conflict { path_id: String, body_id: String },

    #[error(transparent)]
    Storage(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Storage operation timed out: {0}")]
    Timeout(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = ValidationError::new(vec!["title".into(), "author.lastName".into()]);
        assert_eq!(
            err.to_string(),
            "Missing or empty required field(s): title, author.lastName"
        );
    }
}
