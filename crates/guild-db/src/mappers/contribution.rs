//! Contribution entity <-> model mapper

use guild_core::entities::Contribution;
use guild_core::value_objects::Snowflake;

use crate::models::ContributionModel;

use super::{from_millis, to_millis};

impl From<ContributionModel> for Contribution {
    fn from(model: ContributionModel) -> Self {
        Contribution {
            id: Snowflake::new(model.id),
            guild_id: Snowflake::new(model.guild_id),
            player_id: Snowflake::new(model.player_id),
            amount: model.amount,
            kind: model.kind,
            description: model.description,
            created_at: from_millis(model.created_at),
        }
    }
}

/// Contribution values in column order for insertion
pub struct ContributionInsert<'a> {
    pub id: i64,
    pub guild_id: i64,
    pub player_id: i64,
    pub amount: f64,
    pub kind: &'a str,
    pub description: Option<&'a str>,
    pub created_at: i64,
}

impl<'a> ContributionInsert<'a> {
    pub fn new(contribution: &'a Contribution) -> Self {
        Self {
            id: contribution.id.into_inner(),
            guild_id: contribution.guild_id.into_inner(),
            player_id: contribution.player_id.into_inner(),
            amount: contribution.amount,
            kind: &contribution.kind,
            description: contribution.description.as_deref(),
            created_at: to_millis(contribution.created_at),
        }
    }
}
