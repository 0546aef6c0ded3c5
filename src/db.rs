//! SQLite connection setup and schema bootstrap.

use std::path::Path;
use std::str::FromStr as _;

use anyhow::Context as _;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

const MAX_CONNECTIONS: u32 = 8;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS urls (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS urls_name_idx ON urls (name)",
    "CREATE TABLE IF NOT EXISTS url_checks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url_id INTEGER NOT NULL REFERENCES urls (id),
        created_at TEXT NOT NULL,
        status_code INTEGER,
        h1 TEXT,
        title TEXT,
        description TEXT
    )",
    "CREATE INDEX IF NOT EXISTS url_checks_url_id_created_at_idx
        ON url_checks (url_id, created_at)",
];

/// Opens a pool for `database_url` (e.g. `sqlite://page-analyzer.db`) and ensures the
/// schema exists. The database file is created when missing.
pub async fn connect(database_url: &str) -> anyhow::Result<Pool<Sqlite>> {
    if !database_url.starts_with("sqlite:") {
        anyhow::bail!("parse database url: expected a sqlite: url, got {database_url}");
    }
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url: {database_url}"))?;
    open(options).await
}

/// Opens the database file at `path`. Used by tests to place the DB in a temp directory.
pub async fn connect_at(path: impl AsRef<Path>) -> anyhow::Result<Pool<Sqlite>> {
    let options = SqliteConnectOptions::new().filename(path.as_ref());
    open(options).await
}

async fn open(options: SqliteConnectOptions) -> anyhow::Result<Pool<Sqlite>> {
    let options = options.create_if_missing(true).foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .context("connect to database")?;

    ensure_schema(&pool).await.context("bootstrap schema")?;
    Ok(pool)
}

async fn ensure_schema(pool: &Pool<Sqlite>) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }
    tracing::debug!("database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_is_repeatable() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("analyzer.db");

        let pool = connect_at(&path).await.unwrap();
        pool.close().await;
        let pool = connect_at(&path).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name IN ('urls', 'url_checks') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["url_checks".to_string(), "urls".to_string()]);
    }

    #[tokio::test]
    async fn connect_accepts_sqlite_url() {
        let temp = tempfile::TempDir::new().unwrap();
        let url = format!("sqlite://{}", temp.path().join("by-url.db").display());

        let pool = connect(&url).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn connect_rejects_other_drivers() {
        let err = connect("postgres://localhost/analyzer").await.unwrap_err();
        assert!(format!("{err:#}").contains("expected a sqlite: url"));
    }
}
