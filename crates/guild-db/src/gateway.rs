//! Statement gateway
//!
//! Every statement in the crate runs through this type. It owns the
//! pool handle, wraps each driver failure in `StorageError::Query` and
//! offers a detached form for writes nobody waits on.

use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::{Any, AnyPool, FromRow};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::{StorageError, StorageResult};

/// Shared executor over the backend pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Gateway {
    pool: AnyPool,
}

impl Gateway {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for transactional callers.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Run a write statement; returns the affected row count.
    pub async fn execute<'q>(&self, query: Query<'q, Any, AnyArguments<'q>>) -> StorageResult<u64> {
        query
            .execute(&self.pool)
            .await
            .map(|done| done.rows_affected())
            .map_err(StorageError::Query)
    }

    /// Fetch every matching row.
    pub async fn fetch_all<'q, O>(
        &self,
        query: QueryAs<'q, Any, O, AnyArguments<'q>>,
    ) -> StorageResult<Vec<O>>
    where
        O: Send + Unpin + for<'r> FromRow<'r, AnyRow>,
    {
        query.fetch_all(&self.pool).await.map_err(StorageError::Query)
    }

    /// Fetch at most one row.
    pub async fn fetch_optional<'q, O>(
        &self,
        query: QueryAs<'q, Any, O, AnyArguments<'q>>,
    ) -> StorageResult<Option<O>>
    where
        O: Send + Unpin + for<'r> FromRow<'r, AnyRow>,
    {
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Query)
    }

    /// Fetch a single scalar value, such as a count.
    pub async fn fetch_scalar<'q, T>(
        &self,
        query: QueryScalar<'q, Any, T, AnyArguments<'q>>,
    ) -> StorageResult<T>
    where
        T: Send + Unpin,
        (T,): for<'r> FromRow<'r, AnyRow>,
    {
        query.fetch_one(&self.pool).await.map_err(StorageError::Query)
    }

    /// Run a write on a background task. The caller gets the handle and
    /// may await it or drop it; a failed write is logged either way.
    pub fn execute_detached(
        &self,
        sql: &'static str,
        arguments: AnyArguments<'static>,
    ) -> JoinHandle<StorageResult<u64>> {
        let pool = self.pool.clone();
        tokio::spawn(async move {
            let result = sqlx::query_with(sql, arguments)
                .execute(&pool)
                .await
                .map(|done| done.rows_affected())
                .map_err(StorageError::Query);
            if let Err(error) = &result {
                warn!(%error, sql, "detached write failed");
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::open_pool;
    use guild_common::{BackendKind, SqliteSettings, StorageSettings};
    use sqlx::Arguments;

    async fn sqlite_gateway(dir: &tempfile::TempDir) -> Gateway {
        let settings = StorageSettings {
            backend: BackendKind::Sqlite,
            sqlite: SqliteSettings {
                path: dir.path().join("gateway.db").display().to_string(),
                ..SqliteSettings::default()
            },
            ..StorageSettings::default()
        };
        Gateway::new(open_pool(&settings).await.unwrap())
    }

    #[tokio::test]
    async fn test_execute_and_fetch_scalar() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = sqlite_gateway(&dir).await;

        gateway
            .execute(sqlx::query(
                "CREATE TABLE items (id BIGINT PRIMARY KEY, label TEXT NOT NULL)",
            ))
            .await
            .unwrap();
        let affected = gateway
            .execute(
                sqlx::query("INSERT INTO items (id, label) VALUES ($1, $2)")
                    .bind(1_i64)
                    .bind("first"),
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let count: i64 = gateway
            .fetch_scalar(sqlx::query_scalar("SELECT COUNT(*) FROM items"))
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_fetch_optional_misses_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = sqlite_gateway(&dir).await;
        gateway
            .execute(sqlx::query("CREATE TABLE items (id BIGINT PRIMARY KEY)"))
            .await
            .unwrap();

        let row: Option<(i64,)> = gateway
            .fetch_optional(sqlx::query_as("SELECT id FROM items WHERE id = $1").bind(7_i64))
            .await
            .unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_query_errors_are_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = sqlite_gateway(&dir).await;
        let result = gateway.execute(sqlx::query("INSERT INTO missing VALUES (1)")).await;
        assert!(matches!(result, Err(StorageError::Query(_))));
    }

    #[tokio::test]
    async fn test_detached_write_lands() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = sqlite_gateway(&dir).await;
        gateway
            .execute(sqlx::query(
                "CREATE TABLE items (id BIGINT PRIMARY KEY, label TEXT NOT NULL)",
            ))
            .await
            .unwrap();

        let mut arguments = AnyArguments::default();
        arguments.add(2_i64).unwrap();
        arguments.add("detached").unwrap();
        let handle = gateway
            .execute_detached("INSERT INTO items (id, label) VALUES ($1, $2)", arguments);
        assert_eq!(handle.await.unwrap().unwrap(), 1);

        let count: i64 = gateway
            .fetch_scalar(sqlx::query_scalar("SELECT COUNT(*) FROM items"))
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
