//! Guild database model

use sqlx::FromRow;

/// Database model for the guilds table
#[derive(Debug, Clone, FromRow)]
pub struct GuildModel {
    pub id: i64,
    pub name: String,
    pub tag: Option<String>,
    pub description: Option<String>,
    pub leader_id: i64,
    pub home_world: Option<String>,
    pub home_x: Option<f64>,
    pub home_y: Option<f64>,
    pub home_z: Option<f64>,
    pub home_yaw: Option<f64>,
    pub home_pitch: Option<f64>,
    pub balance: f64,
    pub level: i64,
    pub experience: i64,
    pub max_experience: i64,
    pub max_members: i64,
    /// Stored as 0/1
    pub frozen: i64,
    /// Epoch milliseconds
    pub created_at: i64,
    pub updated_at: i64,
}

impl GuildModel {
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen != 0
    }
}
