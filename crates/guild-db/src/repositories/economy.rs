//! Backend-agnostic implementation of EconomyRepository
//!
//! Economy state lives on the guild row; the contribution ledger is its
//! own append-only table.

use async_trait::async_trait;
use tracing::instrument;

use guild_core::entities::Contribution;
use guild_core::traits::{EconomyRepository, RepoResult};
use guild_core::value_objects::Snowflake;

use crate::gateway::Gateway;
use crate::mappers::{to_millis, ContributionInsert};
use crate::models::ContributionModel;

use super::error::{guild_not_found, map_storage_error};

const CONTRIBUTION_COLUMNS: &str =
    "id, guild_id, player_id, amount, kind, description, created_at";

/// EconomyRepository over the statement gateway
#[derive(Clone)]
pub struct AnyEconomyRepository {
    gateway: Gateway,
}

impl AnyEconomyRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    async fn update_guild_row<'q>(
        &self,
        guild_id: Snowflake,
        query: sqlx::query::Query<'q, sqlx::Any, sqlx::any::AnyArguments<'q>>,
    ) -> RepoResult<()> {
        let affected = self.gateway.execute(query).await.map_err(map_storage_error)?;
        if affected == 0 {
            return Err(guild_not_found(guild_id));
        }
        Ok(())
    }
}

#[async_trait]
impl EconomyRepository for AnyEconomyRepository {
    #[instrument(skip(self))]
    async fn update_balance(&self, guild_id: Snowflake, balance: f64) -> RepoResult<()> {
        self.update_guild_row(
            guild_id,
            sqlx::query("UPDATE guilds SET balance = $2, updated_at = $3 WHERE id = $1")
                .bind(guild_id.into_inner())
                .bind(balance)
                .bind(to_millis(chrono::Utc::now())),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn add_experience(&self, guild_id: Snowflake, amount: i64) -> RepoResult<()> {
        self.update_guild_row(
            guild_id,
            sqlx::query(
                "UPDATE guilds SET experience = experience + $2, updated_at = $3 WHERE id = $1",
            )
            .bind(guild_id.into_inner())
            .bind(amount)
            .bind(to_millis(chrono::Utc::now())),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn set_level(
        &self,
        guild_id: Snowflake,
        level: i64,
        max_experience: i64,
    ) -> RepoResult<()> {
        self.update_guild_row(
            guild_id,
            sqlx::query(
                "UPDATE guilds SET level = $2, max_experience = $3, updated_at = $4 WHERE id = $1",
            )
            .bind(guild_id.into_inner())
            .bind(level)
            .bind(max_experience)
            .bind(to_millis(chrono::Utc::now())),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn set_max_members(&self, guild_id: Snowflake, max_members: i64) -> RepoResult<()> {
        self.update_guild_row(
            guild_id,
            sqlx::query("UPDATE guilds SET max_members = $2, updated_at = $3 WHERE id = $1")
                .bind(guild_id.into_inner())
                .bind(max_members)
                .bind(to_millis(chrono::Utc::now())),
        )
        .await
    }

    #[instrument(skip(self, contribution), fields(guild_id = %contribution.guild_id))]
    async fn record_contribution(&self, contribution: &Contribution) -> RepoResult<()> {
        let row = ContributionInsert::new(contribution);
        self.gateway
            .execute(
                sqlx::query(
                    r"
                    INSERT INTO guild_contributions (id, guild_id, player_id, amount, kind,
                        description, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ",
                )
                .bind(row.id)
                .bind(row.guild_id)
                .bind(row.player_id)
                .bind(row.amount)
                .bind(row.kind)
                .bind(row.description)
                .bind(row.created_at),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn contributions_of(
        &self,
        guild_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<Contribution>> {
        let sql = format!(
            "SELECT {CONTRIBUTION_COLUMNS} FROM guild_contributions \
             WHERE guild_id = $1 ORDER BY created_at DESC LIMIT $2"
        );
        let results = self
            .gateway
            .fetch_all(
                sqlx::query_as::<_, ContributionModel>(&sql)
                    .bind(guild_id.into_inner())
                    .bind(limit.max(0)),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(Contribution::from).collect())
    }
}
