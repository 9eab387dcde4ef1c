//! Backend-agnostic implementation of LogRepository
//!
//! Appends are fire-and-forget through the gateway's detached write
//! path; a lost audit line never fails the operation that produced it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::any::AnyArguments;
use sqlx::Arguments;
use tracing::{instrument, warn};

use guild_core::entities::LogEntry;
use guild_core::traits::{LogRepository, RepoResult};
use guild_core::value_objects::Snowflake;

use crate::gateway::Gateway;
use crate::mappers::{to_millis, LogEntryInsert};
use crate::models::LogEntryModel;

use super::error::map_storage_error;

const LOG_COLUMNS: &str =
    "id, guild_id, guild_name, actor_id, log_type, description, details, created_at";

const LOG_INSERT: &str = "INSERT INTO guild_logs (id, guild_id, guild_name, actor_id, \
    log_type, description, details, created_at) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)";

/// LogRepository over the statement gateway
#[derive(Clone)]
pub struct AnyLogRepository {
    gateway: Gateway,
}

impl AnyLogRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    fn arguments(row: LogEntryInsert) -> Result<AnyArguments<'static>, sqlx::error::BoxDynError> {
        let mut arguments = AnyArguments::default();
        arguments.add(row.id)?;
        arguments.add(row.guild_id)?;
        arguments.add(row.guild_name)?;
        arguments.add(row.actor_id)?;
        arguments.add(row.log_type)?;
        arguments.add(row.description)?;
        arguments.add(row.details)?;
        arguments.add(row.created_at)?;
        Ok(arguments)
    }
}

#[async_trait]
impl LogRepository for AnyLogRepository {
    fn append(&self, entry: LogEntry) {
        match Self::arguments(LogEntryInsert::new(entry)) {
            Ok(arguments) => {
                // Handle dropped on purpose; the detached task logs its
                // own failure.
                let _ = self.gateway.execute_detached(LOG_INSERT, arguments);
            }
            Err(error) => warn!(%error, "audit entry could not be encoded"),
        }
    }

    #[instrument(skip(self, entry), fields(guild_id = %entry.guild_id, log_type = %entry.log_type))]
    async fn append_sync(&self, entry: &LogEntry) -> RepoResult<()> {
        let row = LogEntryInsert::new(entry.clone());
        self.gateway
            .execute(
                sqlx::query(LOG_INSERT)
                    .bind(row.id)
                    .bind(row.guild_id)
                    .bind(row.guild_name)
                    .bind(row.actor_id)
                    .bind(row.log_type)
                    .bind(row.description)
                    .bind(row.details)
                    .bind(row.created_at),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: Snowflake, limit: i64) -> RepoResult<Vec<LogEntry>> {
        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM guild_logs \
             WHERE guild_id = $1 ORDER BY created_at DESC LIMIT $2"
        );
        let results = self
            .gateway
            .fetch_all(
                sqlx::query_as::<_, LogEntryModel>(&sql)
                    .bind(guild_id.into_inner())
                    .bind(limit.max(0)),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(LogEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_since(
        &self,
        guild_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<LogEntry>> {
        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM guild_logs \
             WHERE guild_id = $1 AND created_at >= $2 ORDER BY created_at"
        );
        let results = self
            .gateway
            .fetch_all(
                sqlx::query_as::<_, LogEntryModel>(&sql)
                    .bind(guild_id.into_inner())
                    .bind(to_millis(since)),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(LogEntry::from).collect())
    }
}
