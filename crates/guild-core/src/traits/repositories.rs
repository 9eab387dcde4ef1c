//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the storage layer provides
//! the implementation. Mutations happen only through these ports, never
//! by writing back implicitly mutated in-memory state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Application, ApplicationStatus, Contribution, Guild, GuildMember, Invite, InviteStatus,
    LogEntry, Relation, RelationStatus,
};
use crate::error::DomainError;
use crate::value_objects::{GuildHome, GuildRole, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Guild Repository
// ============================================================================

#[async_trait]
pub trait GuildRepository: Send + Sync {
    /// Find guild by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Guild>>;

    /// Find guild by its unique name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Guild>>;

    /// Find guild by its unique tag
    async fn find_by_tag(&self, tag: &str) -> RepoResult<Option<Guild>>;

    /// List every guild
    async fn find_all(&self) -> RepoResult<Vec<Guild>>;

    /// Check if a guild name is taken
    async fn exists_by_name(&self, name: &str) -> RepoResult<bool>;

    /// Create a new guild
    async fn create(&self, guild: &Guild) -> RepoResult<()>;

    /// Update an existing guild
    async fn update(&self, guild: &Guild) -> RepoResult<()>;

    /// Set or clear the home location column group
    async fn update_home(&self, id: Snowflake, home: Option<&GuildHome>) -> RepoResult<()>;

    /// Delete a guild row. Returns whether a row was actually removed;
    /// "nothing to remove" is an outcome, not an error.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find membership by guild and player ID
    async fn find(&self, guild_id: Snowflake, player_id: Snowflake)
        -> RepoResult<Option<GuildMember>>;

    /// List all members of a guild
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<GuildMember>>;

    /// List all memberships of a player
    async fn find_by_player(&self, player_id: Snowflake) -> RepoResult<Vec<GuildMember>>;

    /// Find the leader membership of a guild
    async fn find_leader(&self, guild_id: Snowflake) -> RepoResult<Option<GuildMember>>;

    /// Add a member to a guild
    async fn create(&self, member: &GuildMember) -> RepoResult<()>;

    /// Change a member's role
    async fn update_role(
        &self,
        guild_id: Snowflake,
        player_id: Snowflake,
        role: GuildRole,
    ) -> RepoResult<()>;

    /// Remove a membership row. Returns whether a row was removed.
    async fn delete(&self, guild_id: Snowflake, player_id: Snowflake) -> RepoResult<bool>;

    /// Count members of a guild
    async fn count_by_guild(&self, guild_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Relation Repository
// ============================================================================

#[async_trait]
pub trait RelationRepository: Send + Sync {
    /// Find the relation row between two guilds, in either order
    async fn find_between(
        &self,
        guild_id: Snowflake,
        other_guild_id: Snowflake,
    ) -> RepoResult<Option<Relation>>;

    /// List all relations referencing a guild on either side
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Relation>>;

    /// Create a new relation
    async fn create(&self, relation: &Relation) -> RepoResult<()>;

    /// Update a relation's lifecycle status
    async fn update_status(&self, id: Snowflake, status: RelationStatus) -> RepoResult<()>;

    /// Delete a relation row by ID. Returns whether a row was removed.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Economy Repository
// ============================================================================

#[async_trait]
pub trait EconomyRepository: Send + Sync {
    /// Persist a guild's balance
    async fn update_balance(&self, guild_id: Snowflake, balance: f64) -> RepoResult<()>;

    /// Add experience to a guild's counter
    async fn add_experience(&self, guild_id: Snowflake, amount: i64) -> RepoResult<()>;

    /// Persist level and the matching experience ceiling
    async fn set_level(
        &self,
        guild_id: Snowflake,
        level: i64,
        max_experience: i64,
    ) -> RepoResult<()>;

    /// Persist the member capacity
    async fn set_max_members(&self, guild_id: Snowflake, max_members: i64) -> RepoResult<()>;

    /// Append a contribution ledger row
    async fn record_contribution(&self, contribution: &Contribution) -> RepoResult<()>;

    /// Read a guild's contribution ledger, newest first
    async fn contributions_of(&self, guild_id: Snowflake, limit: i64)
        -> RepoResult<Vec<Contribution>>;
}

// ============================================================================
// Application Repository
// ============================================================================

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Create a new application
    async fn create(&self, application: &Application) -> RepoResult<()>;

    /// List applications for a guild
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Application>>;

    /// List applications filed by a player
    async fn find_by_applicant(&self, applicant_id: Snowflake) -> RepoResult<Vec<Application>>;

    /// Update an application's review status
    async fn update_status(&self, id: Snowflake, status: ApplicationStatus) -> RepoResult<()>;

    /// Delete an application row
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Invite Repository
// ============================================================================

#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Create a new invite
    async fn create(&self, invite: &Invite) -> RepoResult<()>;

    /// List invites issued by a guild
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Invite>>;

    /// List invites addressed to a player
    async fn find_by_invitee(&self, invitee_id: Snowflake) -> RepoResult<Vec<Invite>>;

    /// Update an invite's status
    async fn update_status(&self, id: Snowflake, status: InviteStatus) -> RepoResult<()>;

    /// Delete an invite row
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Log Repository
// ============================================================================

#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Append an audit entry. Best-effort fire-and-forget: the write is
    /// dispatched in the background and failures are logged, not returned.
    fn append(&self, entry: LogEntry);

    /// Append an audit entry and wait for the write to land
    async fn append_sync(&self, entry: &LogEntry) -> RepoResult<()>;

    /// Read the newest entries for a guild
    async fn find_by_guild(&self, guild_id: Snowflake, limit: i64) -> RepoResult<Vec<LogEntry>>;

    /// Read entries for a guild since a given instant
    async fn find_since(
        &self,
        guild_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<LogEntry>>;
}
