//! Value objects - immutable domain primitives

mod home;
mod role;
mod snowflake;

pub use home::GuildHome;
pub use role::GuildRole;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
