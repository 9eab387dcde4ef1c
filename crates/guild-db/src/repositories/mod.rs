//! Repository implementations over the statement gateway
//!
//! One implementation per port in guild-core. All of them are thin:
//! build a statement, hand it to the gateway, translate the outcome.

pub mod error;

mod application;
mod economy;
mod guild;
mod invite;
mod log;
mod member;
mod relation;

pub use application::AnyApplicationRepository;
pub use economy::AnyEconomyRepository;
pub use guild::AnyGuildRepository;
pub use invite::AnyInviteRepository;
pub use log::AnyLogRepository;
pub use member::AnyMemberRepository;
pub use relation::AnyRelationRepository;
