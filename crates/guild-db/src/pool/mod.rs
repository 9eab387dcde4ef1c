//! Connection pool management
//!
//! One pool type serves both supported engines through the sqlx `Any`
//! driver: an embedded SQLite file or a networked PostgreSQL server.
//! Engine-specific tuning (SQLite PRAGMAs, Postgres session settings)
//! is applied on every new connection through the pool's
//! `after_connect` hook. Opening the pool fails fast on invalid
//! parameters; the owning process is expected to abort startup.

use std::sync::{Arc, Once};
use std::time::Duration;

use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, Executor};
use tracing::info;

use guild_common::{BackendKind, PostgresSettings, SqliteSettings, StorageSettings};

use crate::error::{StorageError, StorageResult};

static DRIVERS: Once = Once::new();

/// Register the SQLite and Postgres drivers with the `Any` driver.
/// Safe to call any number of times.
fn install_drivers() {
    DRIVERS.call_once(sqlx::any::install_default_drivers);
}

/// Open the connection pool selected by the settings.
///
/// # Errors
/// `StorageError::Configuration` for invalid parameters,
/// `StorageError::Connection` when the backend cannot be reached.
/// Both are fatal to the caller's startup sequence.
pub async fn open_pool(settings: &StorageSettings) -> StorageResult<AnyPool> {
    install_drivers();
    match settings.backend {
        BackendKind::Sqlite => open_sqlite(&settings.sqlite).await,
        BackendKind::Postgres => open_postgres(&settings.postgres).await,
    }
}

async fn open_sqlite(settings: &SqliteSettings) -> StorageResult<AnyPool> {
    if settings.path.trim().is_empty() {
        return Err(StorageError::Configuration(
            "sqlite file path must not be empty".to_string(),
        ));
    }

    let statements = Arc::new(sqlite_session_statements(settings)?);
    let pool_size = settings.effective_pool_size();
    let acquire_timeout = Duration::from_millis(settings.busy_timeout_ms.max(1_000) as u64);

    let url = format!("sqlite://{}?mode=rwc", settings.path);
    let pool = AnyPoolOptions::new()
        .max_connections(pool_size)
        .min_connections(1)
        .acquire_timeout(acquire_timeout)
        .after_connect(move |conn, _meta| {
            let statements = Arc::clone(&statements);
            Box::pin(async move {
                for stmt in statements.iter() {
                    conn.execute(stmt.as_str()).await?;
                }
                Ok(())
            })
        })
        .connect(&url)
        .await
        .map_err(StorageError::Connection)?;

    info!(path = %settings.path, pool_size, "sqlite pool opened");
    Ok(pool)
}

async fn open_postgres(settings: &PostgresSettings) -> StorageResult<AnyPool> {
    if settings.host.trim().is_empty() {
        return Err(StorageError::Configuration(
            "postgres host must not be empty".to_string(),
        ));
    }
    if settings.port == 0 {
        return Err(StorageError::Configuration(
            "postgres port must not be zero".to_string(),
        ));
    }
    if settings.database.trim().is_empty() {
        return Err(StorageError::Configuration(
            "postgres database name must not be empty".to_string(),
        ));
    }

    let statements = Arc::new(postgres_session_statements(settings)?);
    let sslmode = if settings.ssl { "require" } else { "prefer" };
    let url = format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        settings.username, settings.password, settings.host, settings.port, settings.database,
        sslmode,
    );

    let pool = AnyPoolOptions::new()
        .max_connections(settings.pool_size)
        .min_connections(settings.min_idle)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .max_lifetime(settings.max_lifetime)
        .after_connect(move |conn, _meta| {
            let statements = Arc::clone(&statements);
            Box::pin(async move {
                for stmt in statements.iter() {
                    conn.execute(stmt.as_str()).await?;
                }
                Ok(())
            })
        })
        .connect(&url)
        .await
        .map_err(StorageError::Connection)?;

    info!(
        host = %settings.host,
        port = settings.port,
        database = %settings.database,
        pool_size = settings.pool_size,
        "postgres pool opened"
    );
    Ok(pool)
}

/// PRAGMAs applied to every fresh SQLite connection.
fn sqlite_session_statements(settings: &SqliteSettings) -> StorageResult<Vec<String>> {
    let journal = keyword(
        &settings.journal_mode,
        &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"],
        "sqlite.journal-mode",
    )?;
    let synchronous = keyword(
        &settings.synchronous,
        &["OFF", "NORMAL", "FULL", "EXTRA"],
        "sqlite.synchronous",
    )?;

    Ok(vec![
        format!("PRAGMA journal_mode = {journal}"),
        format!("PRAGMA synchronous = {synchronous}"),
        format!(
            "PRAGMA foreign_keys = {}",
            if settings.foreign_keys { "ON" } else { "OFF" }
        ),
        format!("PRAGMA busy_timeout = {}", settings.busy_timeout_ms.max(0)),
        format!("PRAGMA cache_size = {}", settings.cache_size),
    ])
}

/// Session settings applied to every fresh Postgres connection.
fn postgres_session_statements(settings: &PostgresSettings) -> StorageResult<Vec<String>> {
    let timezone = identifier(&settings.timezone, "postgres.timezone")?;
    let charset = identifier(&settings.charset, "postgres.charset")?;

    Ok(vec![
        format!("SET TIME ZONE '{timezone}'"),
        format!("SET client_encoding TO '{charset}'"),
    ])
}

/// Accept only a known keyword, case-insensitively; these values are
/// spliced into statements and must never carry arbitrary text.
fn keyword(value: &str, allowed: &[&str], key: &'static str) -> StorageResult<String> {
    let upper = value.trim().to_ascii_uppercase();
    if allowed.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(StorageError::Configuration(format!(
            "{key}: unsupported value '{value}'"
        )))
    }
}

/// Identifier-ish values (timezones, encodings): letters, digits and a
/// small set of punctuation.
fn identifier(value: &str, key: &'static str) -> StorageResult<String> {
    let trimmed = value.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-' | '+' | ':'));
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(StorageError::Configuration(format!(
            "{key}: unsupported value '{value}'"
        )))
    }
}
