//! Log entry entity <-> model mapper

use guild_core::entities::LogEntry;
use guild_core::value_objects::Snowflake;

use crate::models::LogEntryModel;

use super::{from_millis, to_millis};

impl From<LogEntryModel> for LogEntry {
    fn from(model: LogEntryModel) -> Self {
        LogEntry {
            id: Snowflake::new(model.id),
            guild_id: Snowflake::new(model.guild_id),
            guild_name: model.guild_name,
            actor_id: Snowflake::new(model.actor_id),
            log_type: model.log_type,
            description: model.description,
            details: model.details,
            created_at: from_millis(model.created_at),
        }
    }
}

/// Log values in column order for insertion. Owns its strings so the
/// detached write path can outlive the entry.
pub struct LogEntryInsert {
    pub id: i64,
    pub guild_id: i64,
    pub guild_name: String,
    pub actor_id: i64,
    pub log_type: String,
    pub description: String,
    pub details: Option<String>,
    pub created_at: i64,
}

impl LogEntryInsert {
    pub fn new(entry: LogEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            guild_id: entry.guild_id.into_inner(),
            guild_name: entry.guild_name,
            actor_id: entry.actor_id.into_inner(),
            log_type: entry.log_type,
            description: entry.description,
            details: entry.details,
            created_at: to_millis(entry.created_at),
        }
    }
}
