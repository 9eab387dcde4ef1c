//! Invite entity <-> model mapper

use guild_core::entities::{Invite, InviteStatus};
use guild_core::value_objects::Snowflake;

use crate::models::InviteModel;

use super::{from_millis, opt_from_millis, to_millis};

impl From<InviteModel> for Invite {
    fn from(model: InviteModel) -> Self {
        Invite {
            id: Snowflake::new(model.id),
            guild_id: Snowflake::new(model.guild_id),
            invitee_id: Snowflake::new(model.invitee_id),
            inviter_id: Snowflake::new(model.inviter_id),
            status: InviteStatus::from_code(&model.status),
            expires_at: opt_from_millis(model.expires_at),
            created_at: from_millis(model.created_at),
        }
    }
}

/// Invite values in column order for insertion
pub struct InviteInsert {
    pub id: i64,
    pub guild_id: i64,
    pub invitee_id: i64,
    pub inviter_id: i64,
    pub status: &'static str,
    pub expires_at: Option<i64>,
    pub created_at: i64,
}

impl InviteInsert {
    pub fn new(invite: &Invite) -> Self {
        Self {
            id: invite.id.into_inner(),
            guild_id: invite.guild_id.into_inner(),
            invitee_id: invite.invitee_id.into_inner(),
            inviter_id: invite.inviter_id.into_inner(),
            status: invite.status.as_code(),
            expires_at: invite.expires_at.map(to_millis),
            created_at: to_millis(invite.created_at),
        }
    }
}
