//! Guild invite entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Invite lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
}

impl InviteStatus {
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "ACCEPTED" => Self::Accepted,
            "DECLINED" => Self::Declined,
            _ => Self::Pending,
        }
    }
}

/// An invitation for a player to join a guild. Expired invites are
/// inert; nothing purges them from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub invitee_id: Snowflake,
    pub inviter_id: Snowflake,
    pub status: InviteStatus,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    pub fn new(
        id: Snowflake,
        guild_id: Snowflake,
        invitee_id: Snowflake,
        inviter_id: Snowflake,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            guild_id,
            invitee_id,
            inviter_id,
            status: InviteStatus::Pending,
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// An invite past its expiry cannot be accepted
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }

    /// Pending and not expired at the given instant
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.status == InviteStatus::Pending && !self.is_expired(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(expires_at: Option<DateTime<Utc>>) -> Invite {
        Invite::new(
            Snowflake::new(9),
            Snowflake::new(1),
            Snowflake::new(300),
            Snowflake::new(100),
            expires_at,
        )
    }

    #[test]
    fn test_invite_without_expiry_is_usable() {
        let invite = sample(None);
        assert!(invite.is_usable(Utc::now()));
    }

    #[test]
    fn test_expired_invite_is_inert() {
        let now = Utc::now();
        let invite = sample(Some(now - Duration::hours(1)));
        assert!(invite.is_expired(now));
        assert!(!invite.is_usable(now));
    }

    #[test]
    fn test_declined_invite_is_not_usable() {
        let mut invite = sample(None);
        invite.status = InviteStatus::Declined;
        assert!(!invite.is_usable(Utc::now()));
    }
}
