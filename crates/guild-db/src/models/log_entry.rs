//! Guild log database model

use sqlx::FromRow;

/// Database model for the guild_logs table
#[derive(Debug, Clone, FromRow)]
pub struct LogEntryModel {
    pub id: i64,
    pub guild_id: i64,
    pub guild_name: String,
    pub actor_id: i64,
    pub log_type: String,
    pub description: String,
    /// JSON payload serialized to text
    pub details: Option<String>,
    pub created_at: i64,
}
