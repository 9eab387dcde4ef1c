//! Relation entity <-> model mapper

use guild_core::entities::{Relation, RelationKind, RelationStatus};
use guild_core::value_objects::Snowflake;

use crate::models::RelationModel;

use super::{from_millis, opt_from_millis, to_millis};

impl From<RelationModel> for Relation {
    fn from(model: RelationModel) -> Self {
        Relation {
            id: Snowflake::new(model.id),
            guild_id: Snowflake::new(model.guild_id),
            other_guild_id: Snowflake::new(model.other_guild_id),
            kind: RelationKind::from_code(&model.kind),
            status: RelationStatus::from_code(&model.status),
            initiated_by: Snowflake::new(model.initiated_by),
            created_at: from_millis(model.created_at),
            updated_at: from_millis(model.updated_at),
            expires_at: opt_from_millis(model.expires_at),
        }
    }
}

/// Relation values in column order for insertion
pub struct RelationInsert {
    pub id: i64,
    pub guild_id: i64,
    pub other_guild_id: i64,
    pub kind: &'static str,
    pub status: &'static str,
    pub initiated_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub expires_at: Option<i64>,
}

impl RelationInsert {
    pub fn new(relation: &Relation) -> Self {
        Self {
            id: relation.id.into_inner(),
            guild_id: relation.guild_id.into_inner(),
            other_guild_id: relation.other_guild_id.into_inner(),
            kind: relation.kind.as_code(),
            status: relation.status.as_code(),
            initiated_by: relation.initiated_by.into_inner(),
            created_at: to_millis(relation.created_at),
            updated_at: to_millis(relation.updated_at),
            expires_at: relation.expires_at.map(to_millis),
        }
    }
}
