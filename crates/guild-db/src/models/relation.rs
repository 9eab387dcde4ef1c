//! Guild relation database model

use sqlx::FromRow;

/// Database model for the guild_relations table
#[derive(Debug, Clone, FromRow)]
pub struct RelationModel {
    pub id: i64,
    pub guild_id: i64,
    pub other_guild_id: i64,
    pub kind: String,
    pub status: String,
    pub initiated_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub expires_at: Option<i64>,
}
