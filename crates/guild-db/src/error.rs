//! Storage layer errors
//!
//! One error kind per failure class. Callers above the repositories
//! never see `sqlx` types; repositories translate these into
//! `DomainError` values.

use sqlx::error::DatabaseError;

/// Storage layer errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Invalid or missing parameter with no safe default. Fatal to the
    /// owning process's startup.
    #[error("Invalid storage configuration: {0}")]
    Configuration(String),

    /// Pool could not be opened or a connection could not be acquired.
    #[error("Connection failure: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement failed during execution. Wraps every driver failure
    /// surfaced through the gateway.
    #[error("Query execution failed: {0}")]
    Query(#[source] sqlx::Error),

    /// A DDL statement failed. Fatal on initial creation, logged-only
    /// during column migration.
    #[error("Schema statement failed: {0}")]
    Schema(#[source] sqlx::Error),
}

impl StorageError {
    /// Access the backend error details, when this wraps a driver error
    pub fn as_database_error(&self) -> Option<&dyn DatabaseError> {
        match self {
            Self::Configuration(_) => None,
            Self::Connection(e) | Self::Query(e) | Self::Schema(e) => e.as_database_error(),
        }
    }

    /// Whether the underlying failure is a uniqueness violation
    pub fn is_unique_violation(&self) -> bool {
        self.as_database_error()
            .is_some_and(DatabaseError::is_unique_violation)
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_has_no_database_error() {
        let err = StorageError::Configuration("bad port".to_string());
        assert!(err.as_database_error().is_none());
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_display_includes_cause() {
        let err = StorageError::Query(sqlx::Error::PoolTimedOut);
        assert!(err.to_string().starts_with("Query execution failed"));
    }
}
