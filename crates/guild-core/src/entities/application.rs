//! Guild membership application entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Application review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "ACCEPTED" => Self::Accepted,
            "REJECTED" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

/// A player's request to join a guild. Removed with the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub applicant_id: Snowflake,
    pub message: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl Application {
    pub fn new(id: Snowflake, guild_id: Snowflake, applicant_id: Snowflake, message: String) -> Self {
        Self {
            id,
            guild_id,
            applicant_id,
            message,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }
}
