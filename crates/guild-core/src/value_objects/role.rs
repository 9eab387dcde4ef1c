//! Guild membership roles

use std::fmt;

/// Membership role, ordered by privilege (`Member < Officer < Leader`).
///
/// Exactly one member per guild holds `Leader` at any time; the storage
/// layer keeps that invariant through the guild's `leader_id` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum GuildRole {
    #[default]
    Member,
    Officer,
    Leader,
}

impl GuildRole {
    /// Storage code for this role
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Leader => "LEADER",
            Self::Officer => "OFFICER",
            Self::Member => "MEMBER",
        }
    }

    /// Decode a storage code. Unknown codes degrade to `Member` rather
    /// than poisoning a whole roster read.
    pub fn from_code(code: &str) -> Self {
        match code {
            "LEADER" => Self::Leader,
            "OFFICER" => Self::Officer,
            _ => Self::Member,
        }
    }

    /// Whether this role may act on (kick, promote) the other role
    #[inline]
    pub fn outranks(self, other: Self) -> bool {
        self > other
    }
}

impl fmt::Display for GuildRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(GuildRole::Leader.outranks(GuildRole::Officer));
        assert!(GuildRole::Officer.outranks(GuildRole::Member));
        assert!(!GuildRole::Member.outranks(GuildRole::Member));
    }

    #[test]
    fn test_role_codec() {
        for role in [GuildRole::Leader, GuildRole::Officer, GuildRole::Member] {
            assert_eq!(GuildRole::from_code(role.as_code()), role);
        }
        assert_eq!(GuildRole::from_code("GARBAGE"), GuildRole::Member);
    }
}
