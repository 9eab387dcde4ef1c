//! # guild-service
//!
//! Application layer: the guild store facade, the in-memory registry
//! and the phased deletion workflow.

pub mod deletion;
pub mod registry;
pub mod store;

pub use deletion::{DeletionOrchestrator, DeletionReport};
pub use registry::GuildRegistry;
pub use store::GuildStore;
