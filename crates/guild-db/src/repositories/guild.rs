//! Backend-agnostic implementation of GuildRepository

use async_trait::async_trait;
use tracing::instrument;

use guild_core::entities::Guild;
use guild_core::error::DomainError;
use guild_core::traits::{GuildRepository, RepoResult};
use guild_core::value_objects::{GuildHome, Snowflake};

use crate::gateway::Gateway;
use crate::mappers::{to_millis, GuildInsert, GuildUpdate};
use crate::models::GuildModel;

use super::error::{guild_not_found, map_storage_error, map_unique_violation};

const GUILD_COLUMNS: &str = "id, name, tag, description, leader_id, \
    home_world, home_x, home_y, home_z, home_yaw, home_pitch, \
    balance, level, experience, max_experience, max_members, frozen, \
    created_at, updated_at";

/// GuildRepository over the statement gateway
#[derive(Clone)]
pub struct AnyGuildRepository {
    gateway: Gateway,
}

impl AnyGuildRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    fn unique_conflict(guild: &Guild, constraint: &str) -> DomainError {
        if constraint.contains("tag") {
            DomainError::TagTaken(guild.tag.clone().unwrap_or_default())
        } else {
            DomainError::NameTaken(guild.name.clone())
        }
    }
}

#[async_trait]
impl GuildRepository for AnyGuildRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Guild>> {
        let sql = format!("SELECT {GUILD_COLUMNS} FROM guilds WHERE id = $1");
        let result = self
            .gateway
            .fetch_optional(sqlx::query_as::<_, GuildModel>(&sql).bind(id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(result.map(Guild::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Guild>> {
        let sql = format!("SELECT {GUILD_COLUMNS} FROM guilds WHERE name = $1");
        let result = self
            .gateway
            .fetch_optional(sqlx::query_as::<_, GuildModel>(&sql).bind(name))
            .await
            .map_err(map_storage_error)?;

        Ok(result.map(Guild::from))
    }

    #[instrument(skip(self))]
    async fn find_by_tag(&self, tag: &str) -> RepoResult<Option<Guild>> {
        let sql = format!("SELECT {GUILD_COLUMNS} FROM guilds WHERE tag = $1");
        let result = self
            .gateway
            .fetch_optional(sqlx::query_as::<_, GuildModel>(&sql).bind(tag))
            .await
            .map_err(map_storage_error)?;

        Ok(result.map(Guild::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Guild>> {
        let sql = format!("SELECT {GUILD_COLUMNS} FROM guilds ORDER BY name");
        let results = self
            .gateway
            .fetch_all(sqlx::query_as::<_, GuildModel>(&sql))
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(Guild::from).collect())
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let count: i64 = self
            .gateway
            .fetch_scalar(
                sqlx::query_scalar("SELECT COUNT(*) FROM guilds WHERE name = $1").bind(name),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(count > 0)
    }

    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    async fn create(&self, guild: &Guild) -> RepoResult<()> {
        let row = GuildInsert::new(guild);
        self.gateway
            .execute(
                sqlx::query(
                    r"
                    INSERT INTO guilds (id, name, tag, description, leader_id,
                        home_world, home_x, home_y, home_z, home_yaw, home_pitch,
                        balance, level, experience, max_experience, max_members, frozen,
                        created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                        $11, $12, $13, $14, $15, $16, $17, $18, $19)
                    ",
                )
                .bind(row.id)
                .bind(row.name)
                .bind(row.tag)
                .bind(row.description)
                .bind(row.leader_id)
                .bind(row.home_world)
                .bind(row.home_x)
                .bind(row.home_y)
                .bind(row.home_z)
                .bind(row.home_yaw)
                .bind(row.home_pitch)
                .bind(row.balance)
                .bind(row.level)
                .bind(row.experience)
                .bind(row.max_experience)
                .bind(row.max_members)
                .bind(row.frozen)
                .bind(row.created_at)
                .bind(row.updated_at),
            )
            .await
            .map_err(|e| map_unique_violation(e, |constraint| Self::unique_conflict(guild, constraint)))?;

        Ok(())
    }

    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    async fn update(&self, guild: &Guild) -> RepoResult<()> {
        let row = GuildUpdate::new(guild);
        let affected = self
            .gateway
            .execute(
                sqlx::query(
                    r"
                    UPDATE guilds
                    SET name = $2, tag = $3, description = $4, leader_id = $5,
                        frozen = $6, updated_at = $7
                    WHERE id = $1
                    ",
                )
                .bind(row.id)
                .bind(row.name)
                .bind(row.tag)
                .bind(row.description)
                .bind(row.leader_id)
                .bind(row.frozen)
                .bind(row.updated_at),
            )
            .await
            .map_err(|e| map_unique_violation(e, |constraint| Self::unique_conflict(guild, constraint)))?;

        if affected == 0 {
            return Err(guild_not_found(guild.id));
        }

        Ok(())
    }

    #[instrument(skip(self, home))]
    async fn update_home(&self, id: Snowflake, home: Option<&GuildHome>) -> RepoResult<()> {
        let affected = self
            .gateway
            .execute(
                sqlx::query(
                    r"
                    UPDATE guilds
                    SET home_world = $2, home_x = $3, home_y = $4, home_z = $5,
                        home_yaw = $6, home_pitch = $7, updated_at = $8
                    WHERE id = $1
                    ",
                )
                .bind(id.into_inner())
                .bind(home.map(|h| h.world.as_str()))
                .bind(home.map(|h| h.x))
                .bind(home.map(|h| h.y))
                .bind(home.map(|h| h.z))
                .bind(home.map(|h| h.yaw))
                .bind(home.map(|h| h.pitch))
                .bind(to_millis(chrono::Utc::now())),
            )
            .await
            .map_err(map_storage_error)?;

        if affected == 0 {
            return Err(guild_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let affected = self
            .gateway
            .execute(sqlx::query("DELETE FROM guilds WHERE id = $1").bind(id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(affected > 0)
    }
}
