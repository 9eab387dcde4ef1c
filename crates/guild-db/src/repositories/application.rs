//! Backend-agnostic implementation of ApplicationRepository

use async_trait::async_trait;
use tracing::instrument;

use guild_core::entities::{Application, ApplicationStatus};
use guild_core::traits::{ApplicationRepository, RepoResult};
use guild_core::value_objects::Snowflake;

use crate::gateway::Gateway;
use crate::mappers::ApplicationInsert;
use crate::models::ApplicationModel;

use super::error::{application_not_found, map_storage_error};

const APPLICATION_COLUMNS: &str = "id, guild_id, applicant_id, message, status, created_at";

/// ApplicationRepository over the statement gateway
#[derive(Clone)]
pub struct AnyApplicationRepository {
    gateway: Gateway,
}

impl AnyApplicationRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ApplicationRepository for AnyApplicationRepository {
    #[instrument(skip(self, application), fields(application_id = %application.id))]
    async fn create(&self, application: &Application) -> RepoResult<()> {
        let row = ApplicationInsert::new(application);
        self.gateway
            .execute(
                sqlx::query(
                    r"
                    INSERT INTO guild_applications (id, guild_id, applicant_id, message,
                        status, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ",
                )
                .bind(row.id)
                .bind(row.guild_id)
                .bind(row.applicant_id)
                .bind(row.message)
                .bind(row.status)
                .bind(row.created_at),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Application>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM guild_applications \
             WHERE guild_id = $1 ORDER BY created_at"
        );
        let results = self
            .gateway
            .fetch_all(sqlx::query_as::<_, ApplicationModel>(&sql).bind(guild_id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(Application::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_applicant(&self, applicant_id: Snowflake) -> RepoResult<Vec<Application>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM guild_applications \
             WHERE applicant_id = $1 ORDER BY created_at"
        );
        let results = self
            .gateway
            .fetch_all(sqlx::query_as::<_, ApplicationModel>(&sql).bind(applicant_id.into_inner()))
            .await
            .map_err(map_storage_error)?;

        Ok(results.into_iter().map(Application::from).collect())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: ApplicationStatus) -> RepoResult<()> {
        let affected = self
            .gateway
            .execute(
                sqlx::query("UPDATE guild_applications SET status = $2 WHERE id = $1")
                    .bind(id.into_inner())
                    .bind(status.as_code()),
            )
            .await
            .map_err(map_storage_error)?;

        if affected == 0 {
            return Err(application_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let affected = self
            .gateway
            .execute(
                sqlx::query("DELETE FROM guild_applications WHERE id = $1").bind(id.into_inner()),
            )
            .await
            .map_err(map_storage_error)?;

        Ok(affected > 0)
    }
}
