//! Guild entity <-> model mapper

use guild_core::entities::Guild;
use guild_core::value_objects::{GuildHome, Snowflake};

use crate::models::GuildModel;

use super::{from_millis, to_millis};

impl From<GuildModel> for Guild {
    fn from(model: GuildModel) -> Self {
        let frozen = model.is_frozen();
        let home = model.home_world.map(|world| GuildHome {
            world,
            x: model.home_x.unwrap_or_default(),
            y: model.home_y.unwrap_or_default(),
            z: model.home_z.unwrap_or_default(),
            yaw: model.home_yaw.unwrap_or_default(),
            pitch: model.home_pitch.unwrap_or_default(),
        });
        Guild {
            id: Snowflake::new(model.id),
            name: model.name,
            tag: model.tag,
            description: model.description,
            leader_id: Snowflake::new(model.leader_id),
            home,
            balance: model.balance,
            level: model.level,
            experience: model.experience,
            max_experience: model.max_experience,
            max_members: model.max_members,
            frozen,
            created_at: from_millis(model.created_at),
            updated_at: from_millis(model.updated_at),
        }
    }
}

/// Guild values in column order for insertion
pub struct GuildInsert<'a> {
    pub id: i64,
    pub name: &'a str,
    pub tag: Option<&'a str>,
    pub description: Option<&'a str>,
    pub leader_id: i64,
    pub home_world: Option<&'a str>,
    pub home_x: Option<f64>,
    pub home_y: Option<f64>,
    pub home_z: Option<f64>,
    pub home_yaw: Option<f64>,
    pub home_pitch: Option<f64>,
    pub balance: f64,
    pub level: i64,
    pub experience: i64,
    pub max_experience: i64,
    pub max_members: i64,
    pub frozen: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl<'a> GuildInsert<'a> {
    pub fn new(guild: &'a Guild) -> Self {
        let home = guild.home.as_ref();
        Self {
            id: guild.id.into_inner(),
            name: &guild.name,
            tag: guild.tag.as_deref(),
            description: guild.description.as_deref(),
            leader_id: guild.leader_id.into_inner(),
            home_world: home.map(|h| h.world.as_str()),
            home_x: home.map(|h| h.x),
            home_y: home.map(|h| h.y),
            home_z: home.map(|h| h.z),
            home_yaw: home.map(|h| h.yaw),
            home_pitch: home.map(|h| h.pitch),
            balance: guild.balance,
            level: guild.level,
            experience: guild.experience,
            max_experience: guild.max_experience,
            max_members: guild.max_members,
            frozen: i64::from(guild.frozen),
            created_at: to_millis(guild.created_at),
            updated_at: to_millis(guild.updated_at),
        }
    }
}

/// Mutable guild columns for a full-row update
pub struct GuildUpdate<'a> {
    pub id: i64,
    pub name: &'a str,
    pub tag: Option<&'a str>,
    pub description: Option<&'a str>,
    pub leader_id: i64,
    pub frozen: i64,
    pub updated_at: i64,
}

impl<'a> GuildUpdate<'a> {
    pub fn new(guild: &'a Guild) -> Self {
        Self {
            id: guild.id.into_inner(),
            name: &guild.name,
            tag: guild.tag.as_deref(),
            description: guild.description.as_deref(),
            leader_id: guild.leader_id.into_inner(),
            frozen: i64::from(guild.frozen),
            updated_at: to_millis(guild.updated_at),
        }
    }
}
