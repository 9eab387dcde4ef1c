//! Guild contribution database model

use sqlx::FromRow;

/// Database model for the guild_contributions table
#[derive(Debug, Clone, FromRow)]
pub struct ContributionModel {
    pub id: i64,
    pub guild_id: i64,
    pub player_id: i64,
    pub amount: f64,
    pub kind: String,
    pub description: Option<String>,
    pub created_at: i64,
}
