//! Test harness over a throwaway SQLite file

use anyhow::Result;
use tempfile::TempDir;

use guild_common::{BackendKind, SqliteSettings, StorageSettings};
use guild_db::{open_pool, Gateway, SchemaManager};
use guild_service::GuildStore;

/// One fully wired storage stack on a temporary database file. The
/// directory is removed when the harness drops.
pub struct TestHarness {
    pub gateway: Gateway,
    pub schema: SchemaManager,
    pub store: GuildStore,
    _dir: TempDir,
}

/// Open a fresh SQLite-backed stack with the schema created.
pub async fn sqlite_harness() -> Result<TestHarness> {
    let dir = tempfile::tempdir()?;
    let settings = StorageSettings {
        backend: BackendKind::Sqlite,
        sqlite: SqliteSettings {
            path: dir.path().join("guilds.db").display().to_string(),
            ..SqliteSettings::default()
        },
        ..StorageSettings::default()
    };

    let pool = open_pool(&settings).await?;
    let schema = SchemaManager::new(pool.clone(), settings.backend);
    schema.create_tables().await?;

    let gateway = Gateway::new(pool);
    let store = GuildStore::from_gateway(gateway.clone(), 1);

    Ok(TestHarness {
        gateway,
        schema,
        store,
        _dir: dir,
    })
}

/// Row count of a table, for asserting cascades.
pub async fn count_rows(gateway: &Gateway, table: &str, guild_id: i64) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE guild_id = $1");
    let count = gateway
        .fetch_scalar(sqlx::query_scalar(&sql).bind(guild_id))
        .await?;
    Ok(count)
}
