//! Error handling utilities for repositories
//!
//! Repositories are the translation point between storage failures and
//! domain errors; nothing above them sees a driver type.

use guild_core::error::DomainError;
use guild_core::value_objects::Snowflake;

use crate::error::StorageError;

/// Convert a storage error to DomainError
pub fn map_storage_error(error: StorageError) -> DomainError {
    DomainError::StorageFailure(error.to_string())
}

/// Check for a unique violation and let the caller pick the conflict
/// error based on the backend's constraint message; anything else
/// degrades to a storage failure.
pub fn map_unique_violation<F>(error: StorageError, on_unique: F) -> DomainError
where
    F: FnOnce(&str) -> DomainError,
{
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            let message = db_error.message().to_string();
            return on_unique(&message);
        }
    }
    map_storage_error(error)
}

/// Create a "guild not found" error
pub fn guild_not_found(id: Snowflake) -> DomainError {
    DomainError::GuildNotFound(id)
}

/// Create a "member not found" error
pub fn member_not_found() -> DomainError {
    DomainError::MemberNotFound
}

/// Create a "relation not found" error
pub fn relation_not_found(id: Snowflake) -> DomainError {
    DomainError::RelationNotFound(id)
}

/// Create an "application not found" error
pub fn application_not_found(id: Snowflake) -> DomainError {
    DomainError::ApplicationNotFound(id)
}

/// Create an "invite not found" error
pub fn invite_not_found(id: Snowflake) -> DomainError {
    DomainError::InviteNotFound(id)
}
