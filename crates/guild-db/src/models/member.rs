//! Guild member database model

use sqlx::FromRow;

/// Database model for the guild_members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub guild_id: i64,
    pub player_id: i64,
    pub display_name: String,
    /// Role code, see `GuildRole::as_code`
    pub role: String,
    pub joined_at: i64,
}
