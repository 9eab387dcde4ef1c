//! Backend-agnostic implementation of InviteRepository

use async_trait::async_trait;
use tracing::instrument;

use guild_core::entities::{Invite, InviteStatus};
use guild_core::traits::{InviteRepository, RepoResult};
use guild_core::value_objects::Snowflake;

use crate::gateway::Gateway;
use crate::mappers::InviteInsert;
use crate::models::InviteModel;

use super::error::{invite_not_found, map_storage_error};

const INVITE_COLUMNS: &str =
    "id, guild_id, invitee_id, inviter_id, status, expires_at, created_at";

/// InviteRepository over the statement gateway
#[derive(Clone)]
pub struct AnyInviteRepository {
    gateway: Gateway,
}

impl AnyInviteRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl InviteRepository for AnyInviteRepository {
    #[instrument(skip(self, invite), fields(invite_id = %invite.id))]
    async fn create(&self, invite: &Invite) -> RepoResult<()> {
        let row = InviteInsert::new(invite);
        self.gateway
            .execute(
                sqlx::query(
                    r"
                    INSERT INTO guild_invites (id, guild_id, invitee_id, inviter_id,
                        status, expires_at, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ",
                )
                .bind(row.id)
                .bind(row.guild_id)
                .bind(row.invitee_id)
                .bind(row.inviter_id)
                .bind(row.status)
                .bind(row.expires_at)
                .bind(row.created_at),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Invite>> {
        let sql = format!(
            "SELECT {INVITE_COLUMNS} FROM guild_invites WHERE guild_id = $1 ORDER BY created_at"
        );
        let results = self
            .gateway
            .fetch_all(sqlx::query_as::<_, InviteModel>(&sql).bind(guild_id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(Invite::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_invitee(&self, invitee_id: Snowflake) -> RepoResult<Vec<Invite>> {
        let sql = format!(
            "SELECT {INVITE_COLUMNS} FROM guild_invites WHERE invitee_id = $1 ORDER BY created_at"
        );
        let results = self
            .gateway
            .fetch_all(sqlx::query_as::<_, InviteModel>(&sql).bind(invitee_id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(Invite::from).collect())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: InviteStatus) -> RepoResult<()> {
        let affected = self
            .gateway
            .execute(
                sqlx::query("UPDATE guild_invites SET status = $2 WHERE id = $1")
                    .bind(id.into_inner())
                    .bind(status.as_code()),
            )
            .await
            .map_err(map_storage_error)?;

        if affected == 0 {
            return Err(invite_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let affected = self
            .gateway
            .execute(sqlx::query("DELETE FROM guild_invites WHERE id = $1").bind(id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(affected > 0)
    }
}
