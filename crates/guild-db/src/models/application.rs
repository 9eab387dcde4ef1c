//! Guild application database model

use sqlx::FromRow;

/// Database model for the guild_applications table
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: i64,
    pub guild_id: i64,
    pub applicant_id: i64,
    pub message: String,
    pub status: String,
    pub created_at: i64,
}
