//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Guild not found: {0}")]
    GuildNotFound(Snowflake),

    #[error("Member not found in guild")]
    MemberNotFound,

    #[error("Relation not found: {0}")]
    RelationNotFound(Snowflake),

    #[error("Application not found: {0}")]
    ApplicationNotFound(Snowflake),

    #[error("Invite not found: {0}")]
    InviteNotFound(Snowflake),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Guild name already taken: {0}")]
    NameTaken(String),

    #[error("Guild tag already taken: {0}")]
    TagTaken(String),

    #[error("Already a member of this guild")]
    AlreadyMember,

    #[error("An active relation already exists between these guilds")]
    RelationExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Guild is at member capacity ({0})")]
    GuildFull(i64),

    #[error("Insufficient guild funds")]
    InsufficientFunds,

    #[error("Guild is frozen")]
    GuildFrozen,

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageFailure(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Stable error code string for callers that key on outcomes
    pub fn code(&self) -> &'static str {
        match self {
            Self::GuildNotFound(_) => "UNKNOWN_GUILD",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::RelationNotFound(_) => "UNKNOWN_RELATION",
            Self::ApplicationNotFound(_) => "UNKNOWN_APPLICATION",
            Self::InviteNotFound(_) => "UNKNOWN_INVITE",
            Self::NameTaken(_) => "NAME_TAKEN",
            Self::TagTaken(_) => "TAG_TAKEN",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::RelationExists => "RELATION_EXISTS",
            Self::GuildFull(_) => "GUILD_FULL",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::GuildFrozen => "GUILD_FROZEN",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::StorageFailure(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GuildNotFound(_)
                | Self::MemberNotFound
                | Self::RelationNotFound(_)
                | Self::ApplicationNotFound(_)
                | Self::InviteNotFound(_)
        )
    }

    /// Check if this is a uniqueness/conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::NameTaken(_) | Self::TagTaken(_) | Self::AlreadyMember | Self::RelationExists
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DomainError::GuildNotFound(Snowflake::new(1)).code(),
            "UNKNOWN_GUILD"
        );
        assert_eq!(
            DomainError::NameTaken("Alpha".to_string()).code(),
            "NAME_TAKEN"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(DomainError::GuildNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::AlreadyMember.is_conflict());
        assert!(!DomainError::StorageFailure("boom".to_string()).is_conflict());
    }

    #[test]
    fn test_display() {
        let err = DomainError::GuildNotFound(Snowflake::new(42));
        assert_eq!(err.to_string(), "Guild not found: 42");
    }
}
