//! Domain entities

mod application;
mod contribution;
mod guild;
mod invite;
mod log_entry;
mod member;
mod relation;

pub use application::{Application, ApplicationStatus};
pub use contribution::Contribution;
pub use guild::{Guild, BASE_MAX_EXPERIENCE, DEFAULT_MAX_MEMBERS};
pub use invite::{Invite, InviteStatus};
pub use log_entry::LogEntry;
pub use member::GuildMember;
pub use relation::{Relation, RelationKind, RelationStatus};
