//! Schema management
//!
//! Table creation runs synchronously at startup and is fatal on
//! failure. Column migration for the guilds table runs as a spawned
//! task after a settling delay; its failures are logged and the
//! process keeps serving with whatever columns exist.

pub mod ddl;

use std::collections::HashSet;
use std::time::Duration;

use sqlx::AnyPool;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use guild_common::BackendKind;

use crate::error::{StorageError, StorageResult};

use ddl::{ColumnSpec, COLUMN_GROUPS, CREATE_INDEXES, CREATE_TABLES, GUILDS_TABLE};

/// Delay before the column migration task touches a fresh deployment.
const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Creates tables and brings the guilds table's columns up to date.
#[derive(Debug, Clone)]
pub struct SchemaManager {
    pool: AnyPool,
    backend: BackendKind,
    settle_delay: Duration,
}

impl SchemaManager {
    pub fn new(pool: AnyPool, backend: BackendKind) -> Self {
        Self {
            pool,
            backend,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Override the migration settling delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Create all tables and indexes. Every statement is guarded by
    /// `IF NOT EXISTS`, so re-running against an existing deployment
    /// is a no-op.
    ///
    /// # Errors
    /// `StorageError::Schema` on the first failing statement. Fatal to
    /// startup.
    #[instrument(skip(self))]
    pub async fn create_tables(&self) -> StorageResult<()> {
        for (name, statement) in CREATE_TABLES {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(StorageError::Schema)?;
            debug!(table = name, "table ensured");
        }
        for statement in CREATE_INDEXES {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(StorageError::Schema)?;
        }
        info!(tables = CREATE_TABLES.len(), "schema ensured");
        Ok(())
    }

    /// Add any guild columns missing from an existing deployment.
    /// Each column group is applied in its own transaction, so one
    /// failing group leaves the others intact. Returns the number of
    /// columns added.
    #[instrument(skip(self))]
    pub async fn migrate_columns(&self) -> StorageResult<usize> {
        let existing = self.guild_columns().await?;
        let mut added = 0;

        for group in COLUMN_GROUPS {
            let missing: Vec<&ColumnSpec> = group
                .columns
                .iter()
                .filter(|column| !existing.contains(column.name))
                .collect();
            if missing.is_empty() {
                continue;
            }

            let mut tx = self.pool.begin().await.map_err(StorageError::Connection)?;
            for column in &missing {
                let statement = format!(
                    "ALTER TABLE {GUILDS_TABLE} ADD COLUMN {} {}",
                    column.name, column.definition
                );
                sqlx::query(&statement)
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::Schema)?;
            }
            tx.commit().await.map_err(StorageError::Schema)?;

            info!(group = group.name, columns = missing.len(), "guild columns added");
            added += missing.len();
        }

        Ok(added)
    }

    /// Run the column migration in a background task after the settling
    /// delay. Failures are logged, never propagated.
    pub fn spawn_migration(&self) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(manager.settle_delay).await;
            match manager.migrate_columns().await {
                Ok(0) => debug!("guild columns already up to date"),
                Ok(added) => info!(columns = added, "guild column migration complete"),
                Err(error) => warn!(%error, "guild column migration failed"),
            }
        })
    }

    /// Current column names of the guilds table.
    async fn guild_columns(&self) -> StorageResult<HashSet<String>> {
        let statement = match self.backend {
            BackendKind::Sqlite => {
                format!("SELECT name FROM pragma_table_info('{GUILDS_TABLE}')")
            }
            BackendKind::Postgres => format!(
                "SELECT column_name::text FROM information_schema.columns \
                 WHERE table_name = '{GUILDS_TABLE}'"
            ),
        };

        let names: Vec<String> = sqlx::query_scalar(&statement)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Schema)?;
        Ok(names.into_iter().collect())
    }
}
