//! Database models
//!
//! Row-shaped structs decoded through the `Any` driver. Timestamps are
//! epoch milliseconds (`i64`) and booleans are `0`/`1` integers; the
//! mappers translate both into domain types.

mod application;
mod contribution;
mod guild;
mod invite;
mod log_entry;
mod member;
mod relation;

pub use application::ApplicationModel;
pub use contribution::ContributionModel;
pub use guild::GuildModel;
pub use invite::InviteModel;
pub use log_entry::LogEntryModel;
pub use member::MemberModel;
pub use relation::RelationModel;
