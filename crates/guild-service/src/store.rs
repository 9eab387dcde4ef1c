//! Guild store
//!
//! Facade over the repositories and the in-memory registry. Reads hit
//! the registry first; every mutation goes through a repository and the
//! registry follows. The store is also the deletion workflow's target:
//! it opts in to all four capabilities.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, instrument, warn};

use guild_core::entities::{Contribution, Guild, GuildMember, LogEntry, Relation, RelationKind};
use guild_core::error::DomainError;
use guild_core::traits::{
    CacheEvictor, DeletionTarget, EconomyRepository, GuildRepository, LogRepository,
    MemberEnumerator, MemberRepository, RelationEnumerator, RelationRepository, RepoResult,
    StandardDelete,
};
use guild_core::value_objects::{GuildRole, Snowflake, SnowflakeGenerator};

use guild_db::Gateway;
use guild_db::{
    AnyEconomyRepository, AnyGuildRepository, AnyLogRepository, AnyMemberRepository,
    AnyRelationRepository,
};

use crate::deletion::{DeletionOrchestrator, DeletionReport};
use crate::registry::GuildRegistry;

/// Application-level guild store
#[derive(Clone)]
pub struct GuildStore {
    guilds: Arc<dyn GuildRepository>,
    members: Arc<dyn MemberRepository>,
    relations: Arc<dyn RelationRepository>,
    economy: Arc<dyn EconomyRepository>,
    logs: Arc<dyn LogRepository>,
    registry: Arc<GuildRegistry>,
    ids: Arc<SnowflakeGenerator>,
}

impl GuildStore {
    pub fn new(
        guilds: Arc<dyn GuildRepository>,
        members: Arc<dyn MemberRepository>,
        relations: Arc<dyn RelationRepository>,
        economy: Arc<dyn EconomyRepository>,
        logs: Arc<dyn LogRepository>,
        ids: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            guilds,
            members,
            relations,
            economy,
            logs,
            registry: Arc::new(GuildRegistry::new()),
            ids,
        }
    }

    /// Wire a store over the default repository implementations.
    pub fn from_gateway(gateway: Gateway, worker_id: u16) -> Self {
        Self::new(
            Arc::new(AnyGuildRepository::new(gateway.clone())),
            Arc::new(AnyMemberRepository::new(gateway.clone())),
            Arc::new(AnyRelationRepository::new(gateway.clone())),
            Arc::new(AnyEconomyRepository::new(gateway.clone())),
            Arc::new(AnyLogRepository::new(gateway)),
            Arc::new(SnowflakeGenerator::new(worker_id)),
        )
    }

    pub fn registry(&self) -> &GuildRegistry {
        &self.registry
    }

    /// Warm the registry from storage. Returns the number of guilds
    /// loaded.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> RepoResult<usize> {
        let guilds = self.guilds.find_all().await?;
        let count = guilds.len();
        for guild in guilds {
            self.registry.insert(guild);
        }
        info!(count, "guild registry loaded");
        Ok(count)
    }

    /// Create a guild with its founding leader membership.
    #[instrument(skip(self, leader_name))]
    pub async fn create_guild(
        &self,
        name: String,
        leader_id: Snowflake,
        leader_name: String,
    ) -> RepoResult<Guild> {
        if self.guilds.exists_by_name(&name).await? {
            return Err(DomainError::NameTaken(name));
        }

        let guild = Guild::new(self.ids.generate(), name, leader_id);
        self.guilds.create(&guild).await?;

        // A guild without its leader membership must not survive. If
        // the second insert fails, take the guild row back out.
        let leader = GuildMember::leader(guild.id, leader_id, leader_name);
        if let Err(error) = self.members.create(&leader).await {
            if let Err(cleanup) = self.guilds.delete(guild.id).await {
                warn!(guild_id = %guild.id, %cleanup, "orphaned guild row could not be removed");
            }
            return Err(error);
        }

        self.registry.insert(guild.clone());
        self.record_log(
            guild.id,
            leader_id,
            "GUILD_CREATE",
            format!("guild {} founded", guild.name),
            Some(json!({ "leader_id": leader_id.to_string() })),
        );

        info!(guild_id = %guild.id, "guild created");
        Ok(guild)
    }

    /// Add a member, enforcing the guild's capacity. Uniqueness of the
    /// (guild, player) pair is enforced at storage.
    #[instrument(skip(self, player_name))]
    pub async fn add_member(
        &self,
        guild_id: Snowflake,
        player_id: Snowflake,
        player_name: String,
        role: GuildRole,
    ) -> RepoResult<GuildMember> {
        let guild = self
            .guild(guild_id)
            .await?
            .ok_or(DomainError::GuildNotFound(guild_id))?;
        if self.members.count_by_guild(guild_id).await? >= guild.max_members {
            return Err(DomainError::GuildFull(guild.max_members));
        }

        let member = GuildMember::new(guild_id, player_id, player_name, role);
        self.members.create(&member).await?;
        self.record_log(
            guild_id,
            player_id,
            "MEMBER_JOIN",
            format!("{} joined the guild", member.display_name),
            Some(json!({ "role": member.role.as_code() })),
        );
        Ok(member)
    }

    /// Establish a relation between two guilds. The pair is unordered
    /// and holds at most one relation row.
    #[instrument(skip(self))]
    pub async fn add_relation(
        &self,
        guild_id: Snowflake,
        other_guild_id: Snowflake,
        kind: RelationKind,
        initiated_by: Snowflake,
    ) -> RepoResult<Relation> {
        if self
            .relations
            .find_between(guild_id, other_guild_id)
            .await?
            .is_some()
        {
            return Err(DomainError::RelationExists);
        }

        let relation = Relation::new(self.ids.generate(), guild_id, other_guild_id, kind, initiated_by);
        self.relations.create(&relation).await?;
        Ok(relation)
    }

    /// Move funds in or out of the treasury and ledger the change.
    /// Negative amounts withdraw; the balance never goes below zero.
    /// Returns the new balance.
    #[instrument(skip(self, kind))]
    pub async fn deposit(
        &self,
        guild_id: Snowflake,
        player_id: Snowflake,
        amount: f64,
        kind: impl Into<String> + Send,
    ) -> RepoResult<f64> {
        let mut guild = self
            .guild(guild_id)
            .await?
            .ok_or(DomainError::GuildNotFound(guild_id))?;
        if guild.frozen {
            return Err(DomainError::GuildFrozen);
        }
        let balance = guild.balance + amount;
        if balance < 0.0 {
            return Err(DomainError::InsufficientFunds);
        }

        self.economy.update_balance(guild_id, balance).await?;
        let contribution =
            Contribution::new(self.ids.generate(), guild_id, player_id, amount, kind);
        self.economy.record_contribution(&contribution).await?;

        guild.balance = balance;
        self.registry.insert(guild);
        Ok(balance)
    }

    /// Append an audit entry; the write lands in the background. The
    /// guild name is taken from the registry when the guild is cached.
    pub fn record_log(
        &self,
        guild_id: Snowflake,
        actor_id: Snowflake,
        log_type: &str,
        description: impl Into<String>,
        details: Option<serde_json::Value>,
    ) {
        let guild_name = self
            .registry
            .get(guild_id)
            .map_or_else(|| guild_id.to_string(), |g| g.name);
        let mut entry = LogEntry::new(
            self.ids.generate(),
            guild_id,
            guild_name,
            actor_id,
            log_type,
            description,
        );
        if let Some(details) = &details {
            entry = entry.with_details(details);
        }
        self.logs.append(entry);
    }

    /// Fetch a guild, registry first, falling back to storage and
    /// backfilling the registry on a hit.
    #[instrument(skip(self))]
    pub async fn guild(&self, guild_id: Snowflake) -> RepoResult<Option<Guild>> {
        if let Some(guild) = self.registry.get(guild_id) {
            return Ok(Some(guild));
        }
        let guild = self.guilds.find_by_id(guild_id).await?;
        if let Some(guild) = &guild {
            self.registry.insert(guild.clone());
        }
        Ok(guild)
    }

    /// Fetch a guild by name, registry first.
    #[instrument(skip(self))]
    pub async fn guild_by_name(&self, name: &str) -> RepoResult<Option<Guild>> {
        if let Some(guild) = self.registry.get_by_name(name) {
            return Ok(Some(guild));
        }
        let guild = self.guilds.find_by_name(name).await?;
        if let Some(guild) = &guild {
            self.registry.insert(guild.clone());
        }
        Ok(guild)
    }

    /// Run the phased deletion workflow against this store and audit
    /// the outcome.
    #[instrument(skip(self))]
    pub async fn delete_guild(&self, guild_id: Snowflake, actor_id: Snowflake) -> DeletionReport {
        let guild_name = self
            .registry
            .get(guild_id)
            .map_or_else(|| guild_id.to_string(), |g| g.name);

        let report = DeletionOrchestrator::delete_guild(self, guild_id).await;

        if report.success {
            self.logs.append(
                LogEntry::new(
                    self.ids.generate(),
                    guild_id,
                    guild_name,
                    actor_id,
                    "GUILD_DELETE",
                    "guild deleted",
                )
                .with_details(&json!({
                    "degraded": report.degraded,
                    "reasons": report.reason_trail(),
                })),
            );
        }

        report
    }
}

#[async_trait]
impl StandardDelete for GuildStore {
    async fn delete_guild(&self, guild_id: Snowflake) -> RepoResult<bool> {
        self.guilds.delete(guild_id).await
    }
}

#[async_trait]
impl RelationEnumerator for GuildStore {
    async fn relations_of(&self, guild_id: Snowflake) -> RepoResult<Vec<Relation>> {
        self.relations.find_by_guild(guild_id).await
    }

    async fn remove_relation(&self, relation_id: Snowflake) -> RepoResult<()> {
        self.relations.delete(relation_id).await?;
        Ok(())
    }
}

#[async_trait]
impl MemberEnumerator for GuildStore {
    async fn members_of(&self, guild_id: Snowflake) -> RepoResult<Vec<GuildMember>> {
        self.members.find_by_guild(guild_id).await
    }

    async fn remove_member(&self, guild_id: Snowflake, player_id: Snowflake) -> RepoResult<()> {
        self.members.delete(guild_id, player_id).await?;
        Ok(())
    }
}

impl DeletionTarget for GuildStore {
    fn standard_delete(&self) -> Option<&dyn StandardDelete> {
        Some(self)
    }

    fn relation_enumerator(&self) -> Option<&dyn RelationEnumerator> {
        Some(self)
    }

    fn member_enumerator(&self) -> Option<&dyn MemberEnumerator> {
        Some(self)
    }

    fn cache_evictor(&self) -> Option<&dyn CacheEvictor> {
        Some(self.registry.as_ref())
    }
}
