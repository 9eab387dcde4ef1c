//! Guild invite database model

use sqlx::FromRow;

/// Database model for the guild_invites table
#[derive(Debug, Clone, FromRow)]
pub struct InviteModel {
    pub id: i64,
    pub guild_id: i64,
    pub invitee_id: i64,
    pub inviter_id: i64,
    pub status: String,
    pub expires_at: Option<i64>,
    pub created_at: i64,
}
