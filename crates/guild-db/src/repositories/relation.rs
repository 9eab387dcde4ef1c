//! Backend-agnostic implementation of RelationRepository

use async_trait::async_trait;
use tracing::instrument;

use guild_core::entities::{Relation, RelationStatus};
use guild_core::error::DomainError;
use guild_core::traits::{RelationRepository, RepoResult};
use guild_core::value_objects::Snowflake;

use crate::gateway::Gateway;
use crate::mappers::{to_millis, RelationInsert};
use crate::models::RelationModel;

use super::error::{map_storage_error, map_unique_violation, relation_not_found};

const RELATION_COLUMNS: &str =
    "id, guild_id, other_guild_id, kind, status, initiated_by, created_at, updated_at, expires_at";

/// RelationRepository over the statement gateway
#[derive(Clone)]
pub struct AnyRelationRepository {
    gateway: Gateway,
}

impl AnyRelationRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RelationRepository for AnyRelationRepository {
    #[instrument(skip(self))]
    async fn find_between(
        &self,
        guild_id: Snowflake,
        other_guild_id: Snowflake,
    ) -> RepoResult<Option<Relation>> {
        let sql = format!(
            "SELECT {RELATION_COLUMNS} FROM guild_relations \
             WHERE (guild_id = $1 AND other_guild_id = $2) \
                OR (guild_id = $2 AND other_guild_id = $1)"
        );
        let result = self
            .gateway
            .fetch_optional(
                sqlx::query_as::<_, RelationModel>(&sql)
                    .bind(guild_id.into_inner())
                    .bind(other_guild_id.into_inner()),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(result.map(Relation::from))
    }

    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Relation>> {
        let sql = format!(
            "SELECT {RELATION_COLUMNS} FROM guild_relations \
             WHERE guild_id = $1 OR other_guild_id = $1 \
             ORDER BY created_at"
        );
        let results = self
            .gateway
            .fetch_all(sqlx::query_as::<_, RelationModel>(&sql).bind(guild_id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(Relation::from).collect())
    }

    #[instrument(skip(self, relation), fields(relation_id = %relation.id))]
    async fn create(&self, relation: &Relation) -> RepoResult<()> {
        // The UNIQUE constraint only covers one column order; the pair
        // is unordered, so the inverse row has to be checked here.
        if self
            .find_between(relation.guild_id, relation.other_guild_id)
            .await?
            .is_some()
        {
            return Err(DomainError::RelationExists);
        }

        let row = RelationInsert::new(relation);
        self.gateway
            .execute(
                sqlx::query(
                    r"
                    INSERT INTO guild_relations (id, guild_id, other_guild_id, kind, status,
                        initiated_by, created_at, updated_at, expires_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    ",
                )
                .bind(row.id)
                .bind(row.guild_id)
                .bind(row.other_guild_id)
                .bind(row.kind)
                .bind(row.status)
                .bind(row.initiated_by)
                .bind(row.created_at)
                .bind(row.updated_at)
                .bind(row.expires_at),
            )
            .await
            .map_err(|e| map_unique_violation(e, |_| DomainError::RelationExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: RelationStatus) -> RepoResult<()> {
        let affected = self
            .gateway
            .execute(
                sqlx::query("UPDATE guild_relations SET status = $2, updated_at = $3 WHERE id = $1")
                    .bind(id.into_inner())
                    .bind(status.as_code())
                    .bind(to_millis(chrono::Utc::now())),
            )
            .await
            .map_err(map_storage_error)?;

        if affected == 0 {
            return Err(relation_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let affected = self
            .gateway
            .execute(sqlx::query("DELETE FROM guild_relations WHERE id = $1").bind(id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(affected > 0)
    }
}
