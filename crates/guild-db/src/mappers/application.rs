//! Application entity <-> model mapper

use guild_core::entities::{Application, ApplicationStatus};
use guild_core::value_objects::Snowflake;

use crate::models::ApplicationModel;

use super::{from_millis, to_millis};

impl From<ApplicationModel> for Application {
    fn from(model: ApplicationModel) -> Self {
        Application {
            id: Snowflake::new(model.id),
            guild_id: Snowflake::new(model.guild_id),
            applicant_id: Snowflake::new(model.applicant_id),
            message: model.message,
            status: ApplicationStatus::from_code(&model.status),
            created_at: from_millis(model.created_at),
        }
    }
}

/// Application values in column order for insertion
pub struct ApplicationInsert<'a> {
    pub id: i64,
    pub guild_id: i64,
    pub applicant_id: i64,
    pub message: &'a str,
    pub status: &'static str,
    pub created_at: i64,
}

impl<'a> ApplicationInsert<'a> {
    pub fn new(application: &'a Application) -> Self {
        Self {
            id: application.id.into_inner(),
            guild_id: application.guild_id.into_inner(),
            applicant_id: application.applicant_id.into_inner(),
            message: &application.message,
            status: application.status.as_code(),
            created_at: to_millis(application.created_at),
        }
    }
}
