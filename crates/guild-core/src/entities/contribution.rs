//! Contribution ledger entry

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// One append-only ledger row recording a player's contribution to a
/// guild (money, experience, items traded in, ...). Never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub player_id: Snowflake,
    pub amount: f64,
    pub kind: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Contribution {
    pub fn new(
        id: Snowflake,
        guild_id: Snowflake,
        player_id: Snowflake,
        amount: f64,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id,
            guild_id,
            player_id,
            amount,
            kind: kind.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
