//! # guild-db
//!
//! Storage layer implementing the guild-core repository traits over an
//! embedded SQLite file or a networked PostgreSQL server, selected at
//! startup through one configuration surface.
//!
//! ## Overview
//!
//! - Connection pool management over the SQLx `Any` driver, with
//!   per-engine session tuning applied to every new connection
//! - Idempotent schema creation plus background column migration for
//!   deployments created by older releases
//! - A statement gateway every query in the crate runs through
//! - Database models, entity mappers and repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guild_common::StorageSettings;
//! use guild_db::{open_pool, Gateway, SchemaManager};
//! use guild_db::repositories::AnyGuildRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = StorageSettings::load()?;
//!     let pool = open_pool(&settings).await?;
//!
//!     let schema = SchemaManager::new(pool.clone(), settings.backend);
//!     schema.create_tables().await?;
//!     schema.spawn_migration();
//!
//!     let guilds = AnyGuildRepository::new(Gateway::new(pool));
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod gateway;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use gateway::Gateway;
pub use pool::open_pool;
pub use repositories::{
    AnyApplicationRepository, AnyEconomyRepository, AnyGuildRepository, AnyInviteRepository,
    AnyLogRepository, AnyMemberRepository, AnyRelationRepository,
};
pub use schema::SchemaManager;
