//! Deletion capability traits
//!
//! The deletion workflow cannot assume the collaborating service exposes
//! a single stable deletion API: cascade enforcement may be missing, a
//! typed delete may not exist, and the last resort is evicting the guild
//! from the service's in-memory cache. Instead of probing an object at
//! runtime, each capability is an explicit trait and `DeletionTarget`
//! reports which ones the service actually implements.

use async_trait::async_trait;

use crate::entities::{GuildMember, Relation};
use crate::traits::RepoResult;
use crate::value_objects::Snowflake;

/// Single-call guild deletion.
///
/// `Ok(true)` means the row was removed; `Ok(false)` means the operation
/// ran but removed nothing (a reported failure, not an error).
#[async_trait]
pub trait StandardDelete: Send + Sync {
    async fn delete_guild(&self, guild_id: Snowflake) -> RepoResult<bool>;
}

/// Enumerate and individually remove relation rows referencing a guild.
#[async_trait]
pub trait RelationEnumerator: Send + Sync {
    async fn relations_of(&self, guild_id: Snowflake) -> RepoResult<Vec<Relation>>;

    async fn remove_relation(&self, relation_id: Snowflake) -> RepoResult<()>;
}

/// Enumerate and individually remove membership rows of a guild.
#[async_trait]
pub trait MemberEnumerator: Send + Sync {
    async fn members_of(&self, guild_id: Snowflake) -> RepoResult<Vec<GuildMember>>;

    async fn remove_member(&self, guild_id: Snowflake, player_id: Snowflake) -> RepoResult<()>;
}

/// Remove a guild from the service's in-memory lookup structures.
///
/// Returns whether an entry was evicted. This makes the guild
/// unreachable through the primary lookup path even when the backing
/// row could not be removed.
pub trait CacheEvictor: Send + Sync {
    fn evict(&self, guild_id: Snowflake) -> bool;
}

/// A collaborating service the deletion workflow can operate against.
///
/// Every accessor defaults to `None`; implementors opt in to exactly the
/// capabilities they have. The workflow degrades per missing capability
/// instead of aborting.
pub trait DeletionTarget: Send + Sync {
    fn standard_delete(&self) -> Option<&dyn StandardDelete> {
        None
    }

    fn relation_enumerator(&self) -> Option<&dyn RelationEnumerator> {
        None
    }

    fn member_enumerator(&self) -> Option<&dyn MemberEnumerator> {
        None
    }

    fn cache_evictor(&self) -> Option<&dyn CacheEvictor> {
        None
    }
}
