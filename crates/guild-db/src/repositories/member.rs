//! Backend-agnostic implementation of MemberRepository

use async_trait::async_trait;
use tracing::instrument;

use guild_core::entities::GuildMember;
use guild_core::error::DomainError;
use guild_core::traits::{MemberRepository, RepoResult};
use guild_core::value_objects::{GuildRole, Snowflake};

use crate::gateway::Gateway;
use crate::mappers::MemberInsert;
use crate::models::MemberModel;

use super::error::{map_storage_error, map_unique_violation, member_not_found};

const MEMBER_COLUMNS: &str = "guild_id, player_id, display_name, role, joined_at";

/// MemberRepository over the statement gateway
#[derive(Clone)]
pub struct AnyMemberRepository {
    gateway: Gateway,
}

impl AnyMemberRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl MemberRepository for AnyMemberRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        guild_id: Snowflake,
        player_id: Snowflake,
    ) -> RepoResult<Option<GuildMember>> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM guild_members WHERE guild_id = $1 AND player_id = $2"
        );
        let result = self
            .gateway
            .fetch_optional(
                sqlx::query_as::<_, MemberModel>(&sql)
                    .bind(guild_id.into_inner())
                    .bind(player_id.into_inner()),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(result.map(GuildMember::from))
    }

    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<GuildMember>> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM guild_members WHERE guild_id = $1 ORDER BY joined_at"
        );
        let results = self
            .gateway
            .fetch_all(sqlx::query_as::<_, MemberModel>(&sql).bind(guild_id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(GuildMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_player(&self, player_id: Snowflake) -> RepoResult<Vec<GuildMember>> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM guild_members WHERE player_id = $1 ORDER BY joined_at"
        );
        let results = self
            .gateway
            .fetch_all(sqlx::query_as::<_, MemberModel>(&sql).bind(player_id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(GuildMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_leader(&self, guild_id: Snowflake) -> RepoResult<Option<GuildMember>> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM guild_members WHERE guild_id = $1 AND role = $2"
        );
        let result = self
            .gateway
            .fetch_optional(
                sqlx::query_as::<_, MemberModel>(&sql)
                    .bind(guild_id.into_inner())
                    .bind(GuildRole::Leader.as_code()),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(result.map(GuildMember::from))
    }

    #[instrument(skip(self, member), fields(guild_id = %member.guild_id, player_id = %member.player_id))]
    async fn create(&self, member: &GuildMember) -> RepoResult<()> {
        let row = MemberInsert::new(member);
        self.gateway
            .execute(
                sqlx::query(
                    r"
                    INSERT INTO guild_members (guild_id, player_id, display_name, role, joined_at)
                    VALUES ($1, $2, $3, $4, $5)
                    ",
                )
                .bind(row.guild_id)
                .bind(row.player_id)
                .bind(row.display_name)
                .bind(row.role)
                .bind(row.joined_at),
            )
            .await
            .map_err(|e| map_unique_violation(e, |_| DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_role(
        &self,
        guild_id: Snowflake,
        player_id: Snowflake,
        role: GuildRole,
    ) -> RepoResult<()> {
        let affected = self
            .gateway
            .execute(
                sqlx::query(
                    "UPDATE guild_members SET role = $3 WHERE guild_id = $1 AND player_id = $2",
                )
                .bind(guild_id.into_inner())
                .bind(player_id.into_inner())
                .bind(role.as_code()),
            )
            .await
            .map_err(map_storage_error)?;

        if affected == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, guild_id: Snowflake, player_id: Snowflake) -> RepoResult<bool> {
        let affected = self
            .gateway
            .execute(
                sqlx::query("DELETE FROM guild_members WHERE guild_id = $1 AND player_id = $2")
                    .bind(guild_id.into_inner())
                    .bind(player_id.into_inner()),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(affected > 0)
    }

    #[instrument(skip(self))]
    async fn count_by_guild(&self, guild_id: Snowflake) -> RepoResult<i64> {
        self.gateway
            .fetch_scalar(
                sqlx::query_scalar("SELECT COUNT(*) FROM guild_members WHERE guild_id = $1")
                    .bind(guild_id.into_inner()),
            )
            .await
            .map_err(map_storage_error)
    }
}
