//! Storage configuration
//!
//! Two historical key layouts are in the wild: a flat layout (`backend`,
//! `sqlite.file`, `postgres.host`, ...) and a nested layout where every
//! key sits under a `database.` prefix. Each logical setting resolves
//! flat-first, then nested, then a hard-coded default, through one
//! resolution function so the precedence is testable on its own.

use std::time::Duration;

use config::Config;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which storage engine backs the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Embedded file-based store (SQLite)
    #[default]
    Sqlite,
    /// Networked relational store (PostgreSQL)
    Postgres,
}

impl BackendKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "sqlite" | "file" | "embedded" => Ok(Self::Sqlite),
            "postgres" | "postgresql" | "networked" => Ok(Self::Postgres),
            _ => Err(ConfigError::InvalidValue {
                key: "backend",
                value: value.to_string(),
            }),
        }
    }
}

/// Networked backend parameters
#[derive(Debug, Clone)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub pool_size: u32,
    pub min_idle: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub ssl: bool,
    pub timezone: String,
    pub charset: String,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5432,
            database: "guilds".to_string(),
            username: "guilds".to_string(),
            password: String::new(),
            pool_size: 10,
            min_idle: 2,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
            ssl: false,
            timezone: "UTC".to_string(),
            charset: "UTF8".to_string(),
        }
    }
}

/// Embedded backend parameters
#[derive(Debug, Clone)]
pub struct SqliteSettings {
    pub path: String,
    /// Raw configured value; may be zero or negative in broken configs.
    pub pool_size: i64,
    pub busy_timeout_ms: i64,
    pub cache_size: i64,
    pub synchronous: String,
    pub journal_mode: String,
    pub foreign_keys: bool,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self {
            path: "data/guilds.db".to_string(),
            pool_size: 4,
            busy_timeout_ms: 5_000,
            cache_size: 2_000,
            synchronous: "NORMAL".to_string(),
            journal_mode: "WAL".to_string(),
            foreign_keys: true,
        }
    }
}

impl SqliteSettings {
    /// Pool size with the floor applied: a file-backed store always gets
    /// at least one connection, even when misconfigured to zero or less.
    pub fn effective_pool_size(&self) -> u32 {
        u32::try_from(self.pool_size).unwrap_or(0).max(1)
    }
}

/// Resolved storage configuration for one backend
#[derive(Debug, Clone, Default)]
pub struct StorageSettings {
    pub backend: BackendKind,
    pub postgres: PostgresSettings,
    pub sqlite: SqliteSettings,
}

impl StorageSettings {
    /// Load from the `guildstore` config file (if present) and
    /// `GUILDSTORE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let file = std::env::var("GUILDSTORE_CONFIG").unwrap_or_else(|_| "guildstore".to_string());
        let cfg = Config::builder()
            .add_source(config::File::with_name(&file).required(false))
            .add_source(config::Environment::with_prefix("GUILDSTORE").separator("__"))
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        Self::resolve(&cfg)
    }

    /// Resolve every logical setting from an already-built source.
    pub fn resolve(cfg: &Config) -> Result<Self, ConfigError> {
        let pg_defaults = PostgresSettings::default();
        let lite_defaults = SqliteSettings::default();

        let backend = BackendKind::parse(&lookup_string(cfg, "backend", "sqlite"))?;

        let postgres = PostgresSettings {
            host: lookup_string(cfg, "postgres.host", &pg_defaults.host),
            port: lookup_port(cfg, "postgres.port", pg_defaults.port)?,
            database: lookup_string(cfg, "postgres.database", &pg_defaults.database),
            username: lookup_string(cfg, "postgres.username", &pg_defaults.username),
            password: lookup_string(cfg, "postgres.password", &pg_defaults.password),
            pool_size: lookup_int(cfg, "postgres.pool-size", i64::from(pg_defaults.pool_size))
                .clamp(1, 1_024) as u32,
            min_idle: lookup_int(cfg, "postgres.min-idle", i64::from(pg_defaults.min_idle))
                .clamp(0, 1_024) as u32,
            acquire_timeout: lookup_secs(cfg, "postgres.acquire-timeout", pg_defaults.acquire_timeout),
            idle_timeout: lookup_secs(cfg, "postgres.idle-timeout", pg_defaults.idle_timeout),
            max_lifetime: lookup_secs(cfg, "postgres.max-lifetime", pg_defaults.max_lifetime),
            ssl: lookup_bool(cfg, "postgres.ssl", pg_defaults.ssl),
            timezone: lookup_string(cfg, "postgres.timezone", &pg_defaults.timezone),
            charset: lookup_string(cfg, "postgres.charset", &pg_defaults.charset),
        };

        let sqlite = SqliteSettings {
            path: lookup_string(cfg, "sqlite.file", &lite_defaults.path),
            pool_size: lookup_int(cfg, "sqlite.pool-size", lite_defaults.pool_size),
            busy_timeout_ms: lookup_int(cfg, "sqlite.busy-timeout", lite_defaults.busy_timeout_ms),
            cache_size: lookup_int(cfg, "sqlite.cache-size", lite_defaults.cache_size),
            synchronous: lookup_string(cfg, "sqlite.synchronous", &lite_defaults.synchronous),
            journal_mode: lookup_string(cfg, "sqlite.journal-mode", &lite_defaults.journal_mode),
            foreign_keys: lookup_bool(cfg, "sqlite.foreign-keys", lite_defaults.foreign_keys),
        };

        Ok(Self {
            backend,
            postgres,
            sqlite,
        })
    }
}

// Precedence: flat key, then the legacy "database."-prefixed layout,
// then the hard-coded default.

fn lookup_string(cfg: &Config, key: &str, default: &str) -> String {
    cfg.get_string(key)
        .or_else(|_| cfg.get_string(&format!("database.{key}")))
        .unwrap_or_else(|_| default.to_string())
}

fn lookup_int(cfg: &Config, key: &str, default: i64) -> i64 {
    cfg.get_int(key)
        .or_else(|_| cfg.get_int(&format!("database.{key}")))
        .unwrap_or(default)
}

fn lookup_bool(cfg: &Config, key: &str, default: bool) -> bool {
    cfg.get_bool(key)
        .or_else(|_| cfg.get_bool(&format!("database.{key}")))
        .unwrap_or(default)
}

fn lookup_secs(cfg: &Config, key: &str, default: Duration) -> Duration {
    let secs = lookup_int(cfg, key, default.as_secs() as i64);
    if secs <= 0 {
        default
    } else {
        Duration::from_secs(secs as u64)
    }
}

fn lookup_port(cfg: &Config, key: &'static str, default: u16) -> Result<u16, ConfigError> {
    let raw = lookup_int(cfg, key, i64::from(default));
    u16::try_from(raw).map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(overrides: &[(&str, &str)]) -> Config {
        let mut builder = Config::builder();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let settings = StorageSettings::resolve(&build(&[])).unwrap();
        assert_eq!(settings.backend, BackendKind::Sqlite);
        assert_eq!(settings.sqlite.path, "data/guilds.db");
        assert_eq!(settings.postgres.port, 5432);
    }

    #[test]
    fn test_flat_layout_wins_over_nested() {
        let cfg = build(&[
            ("postgres.host", "flat-host"),
            ("database.postgres.host", "nested-host"),
        ]);
        let settings = StorageSettings::resolve(&cfg).unwrap();
        assert_eq!(settings.postgres.host, "flat-host");
    }

    #[test]
    fn test_nested_layout_resolves_identically_to_flat() {
        let flat = StorageSettings::resolve(&build(&[
            ("backend", "postgres"),
            ("postgres.host", "db.example"),
            ("postgres.port", "6432"),
            ("postgres.ssl", "true"),
            ("sqlite.busy-timeout", "2500"),
        ]))
        .unwrap();

        let nested = StorageSettings::resolve(&build(&[
            ("database.backend", "postgres"),
            ("database.postgres.host", "db.example"),
            ("database.postgres.port", "6432"),
            ("database.postgres.ssl", "true"),
            ("database.sqlite.busy-timeout", "2500"),
        ]))
        .unwrap();

        assert_eq!(flat.backend, nested.backend);
        assert_eq!(flat.postgres.host, nested.postgres.host);
        assert_eq!(flat.postgres.port, nested.postgres.port);
        assert_eq!(flat.postgres.ssl, nested.postgres.ssl);
        assert_eq!(flat.sqlite.busy_timeout_ms, nested.sqlite.busy_timeout_ms);
    }

    #[test]
    fn test_sqlite_pool_floor() {
        for raw in ["0", "-3"] {
            let cfg = build(&[("sqlite.pool-size", raw)]);
            let settings = StorageSettings::resolve(&cfg).unwrap();
            assert_eq!(settings.sqlite.effective_pool_size(), 1);
        }

        let cfg = build(&[("sqlite.pool-size", "8")]);
        let settings = StorageSettings::resolve(&cfg).unwrap();
        assert_eq!(settings.sqlite.effective_pool_size(), 8);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let cfg = build(&[("backend", "oracle")]);
        assert!(StorageSettings::resolve(&cfg).is_err());
    }

    #[test]
    fn test_backend_aliases() {
        for (alias, expected) in [
            ("embedded", BackendKind::Sqlite),
            ("file", BackendKind::Sqlite),
            ("networked", BackendKind::Postgres),
            ("PostgreSQL", BackendKind::Postgres),
        ] {
            let cfg = build(&[("backend", alias)]);
            assert_eq!(StorageSettings::resolve(&cfg).unwrap().backend, expected);
        }
    }
}
