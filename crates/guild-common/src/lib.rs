//! # guild-common
//!
//! Shared infrastructure: storage configuration resolution (flat and
//! legacy nested key layouts) and tracing setup.

pub mod config;
pub mod telemetry;

pub use config::{BackendKind, ConfigError, PostgresSettings, SqliteSettings, StorageSettings};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig};
