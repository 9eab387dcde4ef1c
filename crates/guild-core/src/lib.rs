//! # guild-core
//!
//! Domain layer containing entities, value objects, repository traits and
//! the deletion-capability traits. This crate has zero dependencies on
//! infrastructure (database driver, runtime wiring, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Application, ApplicationStatus, Contribution, Guild, GuildMember, Invite, InviteStatus,
    LogEntry, Relation, RelationKind, RelationStatus,
};
pub use error::DomainError;
pub use traits::{
    ApplicationRepository, CacheEvictor, DeletionTarget, EconomyRepository, GuildRepository,
    InviteRepository, LogRepository, MemberEnumerator, MemberRepository, RelationEnumerator,
    RelationRepository, RepoResult, StandardDelete,
};
pub use value_objects::{GuildHome, GuildRole, Snowflake, SnowflakeGenerator, SnowflakeParseError};
