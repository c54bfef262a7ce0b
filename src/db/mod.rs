// Document store: one JSON document per fixed key, whole-document replace.
// This mirrors the storage layout the catalog's collections always had
// (profile, favorites, history, downloads), with a schema version column
// so a future format change is detected instead of silently misparsed.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

/// Format version written with every document. Bump when the serialized
/// shape of any persisted type changes.
pub const SCHEMA_VERSION: i64 = 1;

/// Fixed document names. One document per collection, whole-document
/// replace on every write.
pub mod keys {
    pub const PROFILE: &str = "profile";
    pub const FAVORITES: &str = "favorites";
    pub const HISTORY: &str = "history";
    pub const DOWNLOADS: &str = "downloads";
}

pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        // WAL mode for better concurrent read/write performance
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        // NORMAL sync is safe with WAL and much faster
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        // Busy timeout for concurrent access (5 seconds)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await
        .context("Failed to open SQLite database")?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            name TEXT PRIMARY KEY,
            schema_version INTEGER NOT NULL,
            body TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to run migrations")?;

    Ok(())
}

/// Read a named document. A missing row, a schema version mismatch, or a
/// body that no longer parses all read as `None`: the store is a disposable
/// local cache, so corrupted state is dropped with a warning rather than
/// surfaced to the caller.
pub async fn get_document<'e, T, E>(executor: E, name: &str) -> crate::error::Result<Option<T>>
where
    T: DeserializeOwned,
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT schema_version, body FROM documents WHERE name = ?")
            .bind(name)
            .fetch_optional(executor)
            .await?;

    let Some((version, body)) = row else {
        return Ok(None);
    };

    if version != SCHEMA_VERSION {
        tracing::warn!(
            document = name,
            stored = version,
            expected = SCHEMA_VERSION,
            "document schema version mismatch, treating as absent"
        );
        return Ok(None);
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(document = name, error = %e, "discarding unparseable document");
            Ok(None)
        }
    }
}

/// Replace a named document wholesale.
pub async fn put_document<'e, T, E>(executor: E, name: &str, value: &T) -> crate::error::Result<()>
where
    T: Serialize,
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let body = serde_json::to_string(value)?;

    sqlx::query(
        r#"
        INSERT INTO documents (name, schema_version, body, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(name) DO UPDATE SET
            schema_version = excluded.schema_version,
            body = excluded.body,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(name)
    .bind(SCHEMA_VERSION)
    .bind(body)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(executor)
    .await?;

    Ok(())
}

/// Delete a named document. Deleting an absent document is a no-op.
pub async fn delete_document<'e, E>(executor: E, name: &str) -> crate::error::Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM documents WHERE name = ?")
        .bind(name)
        .execute(executor)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        // A single connection so every query sees the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        migrate(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_missing_document_reads_as_none() {
        let pool = test_pool().await;
        let value: Option<Vec<String>> = get_document(&pool, "nothing").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let pool = test_pool().await;
        let list = vec!["a".to_string(), "b".to_string()];
        put_document(&pool, "list", &list).await.unwrap();

        let stored: Option<Vec<String>> = get_document(&pool, "list").await.unwrap();
        assert_eq!(stored, Some(list));
    }

    #[tokio::test]
    async fn test_corrupted_body_reads_as_none() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO documents (name, schema_version, body) VALUES (?, ?, ?)")
            .bind("broken")
            .bind(SCHEMA_VERSION)
            .bind("{not json")
            .execute(&pool)
            .await
            .unwrap();

        let value: Option<Vec<String>> = get_document(&pool, "broken").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_schema_version_mismatch_reads_as_none() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO documents (name, schema_version, body) VALUES (?, ?, ?)")
            .bind("old")
            .bind(SCHEMA_VERSION + 1)
            .bind("[]")
            .execute(&pool)
            .await
            .unwrap();

        let value: Option<Vec<String>> = get_document(&pool, "old").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_document_is_noop() {
        let pool = test_pool().await;
        delete_document(&pool, "nothing").await.unwrap();
    }
}
