//! Guild audit log entry

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// One append-only audit row. The guild name is denormalized so log
/// lines stay readable after the guild row is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub guild_name: String,
    pub actor_id: Snowflake,
    pub log_type: String,
    pub description: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(
        id: Snowflake,
        guild_id: Snowflake,
        guild_name: impl Into<String>,
        actor_id: Snowflake,
        log_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            guild_id,
            guild_name: guild_name.into(),
            actor_id,
            log_type: log_type.into(),
            description: description.into(),
            details: None,
            created_at: Utc::now(),
        }
    }

    /// Attach structured details, serialized to JSON text
    pub fn with_details(mut self, details: &serde_json::Value) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_serialization() {
        let entry = LogEntry::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "Alpha",
            Snowflake::new(100),
            "MEMBER_JOIN",
            "Rook joined the guild",
        )
        .with_details(&json!({ "role": "MEMBER" }));

        assert_eq!(entry.details.as_deref(), Some(r#"{"role":"MEMBER"}"#));
    }
}
