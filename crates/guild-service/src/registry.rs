//! In-memory guild registry
//!
//! Concurrent cache of loaded guilds with a name index. The registry is
//! the primary lookup path during normal operation; storage stays the
//! source of truth and the registry is rebuilt from it at startup.

use dashmap::DashMap;

use guild_core::entities::Guild;
use guild_core::traits::CacheEvictor;
use guild_core::value_objects::Snowflake;

/// Concurrent id and name index over loaded guilds
#[derive(Debug, Default)]
pub struct GuildRegistry {
    guilds: DashMap<i64, Guild>,
    // Lowercased name -> guild id
    names: DashMap<String, i64>,
}

impl GuildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a guild. The name index follows renames.
    pub fn insert(&self, guild: Guild) {
        let id = guild.id.into_inner();
        if let Some(previous) = self.guilds.insert(id, guild) {
            self.names.remove(&previous.name.to_lowercase());
        }
        // Borrow the stored copy for the index key
        if let Some(stored) = self.guilds.get(&id) {
            self.names.insert(stored.name.to_lowercase(), id);
        }
    }

    pub fn get(&self, guild_id: Snowflake) -> Option<Guild> {
        self.guilds.get(&guild_id.into_inner()).map(|g| g.clone())
    }

    /// Case-insensitive name lookup
    pub fn get_by_name(&self, name: &str) -> Option<Guild> {
        let id = *self.names.get(&name.to_lowercase())?;
        self.guilds.get(&id).map(|g| g.clone())
    }

    pub fn contains(&self, guild_id: Snowflake) -> bool {
        self.guilds.contains_key(&guild_id.into_inner())
    }

    /// Remove a guild and its name index entry
    pub fn remove(&self, guild_id: Snowflake) -> Option<Guild> {
        let (_, guild) = self.guilds.remove(&guild_id.into_inner())?;
        self.names.remove(&guild.name.to_lowercase());
        Some(guild)
    }

    pub fn len(&self) -> usize {
        self.guilds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guilds.is_empty()
    }

    /// Snapshot of all loaded guild ids
    pub fn ids(&self) -> Vec<Snowflake> {
        self.guilds.iter().map(|e| e.value().id).collect()
    }
}

impl CacheEvictor for GuildRegistry {
    fn evict(&self, guild_id: Snowflake) -> bool {
        self.remove(guild_id).is_some()
    }
}
