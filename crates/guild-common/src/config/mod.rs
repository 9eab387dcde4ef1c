//! Configuration loading and resolution

mod settings;

pub use settings::{BackendKind, ConfigError, PostgresSettings, SqliteSettings, StorageSettings};
