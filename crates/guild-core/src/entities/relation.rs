//! Guild-to-guild relation entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Kind of association between two guilds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Alliance,
    War,
    Truce,
}

impl RelationKind {
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Alliance => "ALLIANCE",
            Self::War => "WAR",
            Self::Truce => "TRUCE",
        }
    }

    /// Unknown codes degrade to `Truce`, the neutral kind.
    pub fn from_code(code: &str) -> Self {
        match code {
            "ALLIANCE" => Self::Alliance,
            "WAR" => Self::War,
            _ => Self::Truce,
        }
    }
}

/// Lifecycle status of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationStatus {
    Pending,
    Active,
    Ended,
}

impl RelationStatus {
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Ended => "ENDED",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "PENDING" => Self::Pending,
            "ACTIVE" => Self::Active,
            _ => Self::Ended,
        }
    }
}

/// A paired association between two guilds. A pair has at most one
/// non-ended relation row at a time (unique at storage).
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub other_guild_id: Snowflake,
    pub kind: RelationKind,
    pub status: RelationStatus,
    pub initiated_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Relation {
    pub fn new(
        id: Snowflake,
        guild_id: Snowflake,
        other_guild_id: Snowflake,
        kind: RelationKind,
        initiated_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            guild_id,
            other_guild_id,
            kind,
            status: RelationStatus::Pending,
            initiated_by,
            created_at: now,
            updated_at: now,
            expires_at: None,
        }
    }

    /// Whether the relation references the given guild on either side
    #[inline]
    pub fn involves(&self, guild_id: Snowflake) -> bool {
        self.guild_id == guild_id || self.other_guild_id == guild_id
    }

    /// The guild on the opposite side, if this relation involves `guild_id`
    pub fn partner_of(&self, guild_id: Snowflake) -> Option<Snowflake> {
        if self.guild_id == guild_id {
            Some(self.other_guild_id)
        } else if self.other_guild_id == guild_id {
            Some(self.guild_id)
        } else {
            None
        }
    }

    /// Active and not past its expiry at the given instant
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status == RelationStatus::Active
            && self.expires_at.map_or(true, |expiry| expiry > now)
    }
}
