//! Guild entity - the top-level organizational aggregate

use chrono::{DateTime, Utc};

use crate::value_objects::{GuildHome, Snowflake};

/// Default member capacity for a freshly created guild
pub const DEFAULT_MAX_MEMBERS: i64 = 20;

/// Experience required to clear level 1
pub const BASE_MAX_EXPERIENCE: i64 = 1_000;

/// Guild aggregate root. Owns memberships, relations, economy state,
/// contributions and logs; dependent rows are removed with the guild.
#[derive(Debug, Clone, PartialEq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub tag: Option<String>,
    pub description: Option<String>,
    pub leader_id: Snowflake,
    pub home: Option<GuildHome>,
    pub balance: f64,
    pub level: i64,
    pub experience: i64,
    pub max_experience: i64,
    pub max_members: i64,
    pub frozen: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guild {
    /// Create a new Guild with default economy state
    pub fn new(id: Snowflake, name: String, leader_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            tag: None,
            description: None,
            leader_id,
            home: None,
            balance: 0.0,
            level: 1,
            experience: 0,
            max_experience: BASE_MAX_EXPERIENCE,
            max_members: DEFAULT_MAX_MEMBERS,
            frozen: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether a player leads this guild
    #[inline]
    pub fn is_leader(&self, player_id: Snowflake) -> bool {
        self.leader_id == player_id
    }

    /// Update the guild name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.touch();
    }

    /// Update the guild tag
    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
        self.touch();
    }

    /// Update the guild description
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    /// Set or clear the home location
    pub fn set_home(&mut self, home: Option<GuildHome>) {
        self.home = home;
        self.touch();
    }

    /// Hand leadership to another player. The new leader must already be
    /// a member; callers enforce that before persisting.
    pub fn transfer_leadership(&mut self, new_leader_id: Snowflake) {
        self.leader_id = new_leader_id;
        self.touch();
    }

    /// Add funds to the guild balance
    pub fn deposit(&mut self, amount: f64) {
        self.balance += amount.max(0.0);
        self.touch();
    }

    /// Remove funds if the balance covers the amount. Balance never
    /// goes negative.
    pub fn try_withdraw(&mut self, amount: f64) -> bool {
        if amount < 0.0 || self.balance < amount {
            return false;
        }
        self.balance -= amount;
        self.touch();
        true
    }

    /// Add experience. Level progression is decided by callers; this
    /// only accumulates the counter.
    pub fn add_experience(&mut self, amount: i64) {
        self.experience += amount.max(0);
        self.touch();
    }

    /// Freeze or unfreeze the guild
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Guild {
        Guild::new(Snowflake::new(1), "Alpha".to_string(), Snowflake::new(100))
    }

    #[test]
    fn test_new_guild_defaults() {
        let guild = sample();
        assert_eq!(guild.level, 1);
        assert_eq!(guild.balance, 0.0);
        assert_eq!(guild.max_members, DEFAULT_MAX_MEMBERS);
        assert!(!guild.frozen);
        assert!(guild.home.is_none());
        assert!(guild.is_leader(Snowflake::new(100)));
        assert!(!guild.is_leader(Snowflake::new(200)));
    }

    #[test]
    fn test_withdraw_never_goes_negative() {
        let mut guild = sample();
        guild.deposit(50.0);
        assert!(!guild.try_withdraw(60.0));
        assert_eq!(guild.balance, 50.0);
        assert!(guild.try_withdraw(20.0));
        assert_eq!(guild.balance, 30.0);
        assert!(!guild.try_withdraw(-1.0));
    }

    #[test]
    fn test_transfer_leadership() {
        let mut guild = sample();
        guild.transfer_leadership(Snowflake::new(200));
        assert!(guild.is_leader(Snowflake::new(200)));
        assert!(!guild.is_leader(Snowflake::new(100)));
    }

    #[test]
    fn test_set_home() {
        let mut guild = sample();
        guild.set_home(Some(crate::value_objects::GuildHome::new(
            "world", 0.0, 70.0, 0.0,
        )));
        assert!(guild.home.is_some());
        guild.set_home(None);
        assert!(guild.home.is_none());
    }
}
