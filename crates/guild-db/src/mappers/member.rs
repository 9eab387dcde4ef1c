//! Member entity <-> model mapper

use guild_core::entities::GuildMember;
use guild_core::value_objects::{GuildRole, Snowflake};

use crate::models::MemberModel;

use super::{from_millis, to_millis};

impl From<MemberModel> for GuildMember {
    fn from(model: MemberModel) -> Self {
        GuildMember {
            guild_id: Snowflake::new(model.guild_id),
            player_id: Snowflake::new(model.player_id),
            display_name: model.display_name,
            role: GuildRole::from_code(&model.role),
            joined_at: from_millis(model.joined_at),
        }
    }
}

/// Member values in column order for insertion
pub struct MemberInsert<'a> {
    pub guild_id: i64,
    pub player_id: i64,
    pub display_name: &'a str,
    pub role: &'static str,
    pub joined_at: i64,
}

impl<'a> MemberInsert<'a> {
    pub fn new(member: &'a GuildMember) -> Self {
        Self {
            guild_id: member.guild_id.into_inner(),
            player_id: member.player_id.into_inner(),
            display_name: &member.display_name,
            role: member.role.as_code(),
            joined_at: to_millis(member.joined_at),
        }
    }
}
