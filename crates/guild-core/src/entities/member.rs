//! Guild membership entity

use chrono::{DateTime, Utc};

use crate::value_objects::{GuildRole, Snowflake};

/// A player's membership in one guild. The (guild, player) pair is
/// unique at storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub guild_id: Snowflake,
    pub player_id: Snowflake,
    pub display_name: String,
    pub role: GuildRole,
    pub joined_at: DateTime<Utc>,
}

impl GuildMember {
    /// Create a new membership with the given role
    pub fn new(
        guild_id: Snowflake,
        player_id: Snowflake,
        display_name: String,
        role: GuildRole,
    ) -> Self {
        Self {
            guild_id,
            player_id,
            display_name,
            role,
            joined_at: Utc::now(),
        }
    }

    /// Create the founding leader membership
    pub fn leader(guild_id: Snowflake, player_id: Snowflake, display_name: String) -> Self {
        Self::new(guild_id, player_id, display_name, GuildRole::Leader)
    }

    #[inline]
    pub fn is_leader(&self) -> bool {
        self.role == GuildRole::Leader
    }
}
