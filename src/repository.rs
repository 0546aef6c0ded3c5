use anyhow::Context as _;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::model::{NewUrlCheck, Url, UrlCheck, UrlSummary};

#[async_trait]
pub trait UrlRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Url>>;
    async fn insert(&self, name: &str, created_at: DateTime<Utc>) -> anyhow::Result<i64>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<Url>>;
    /// Every Url with its newest check. Never-checked Urls come last; ties go to the
    /// higher id first.
    async fn list_with_latest_check(&self) -> anyhow::Result<Vec<UrlSummary>>;
    /// Checks of one Url, newest first.
    async fn list_checks(&self, url_id: i64) -> anyhow::Result<Vec<UrlCheck>>;
    async fn insert_check(
        &self,
        check: &NewUrlCheck,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<i64>;
}

#[derive(Debug, Clone)]
pub struct SqliteUrlRepository {
    pool: Pool<Sqlite>,
}

impl SqliteUrlRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Url>> {
        sqlx::query_as::<_, Url>("SELECT id, name, created_at FROM urls WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("find url by name: {name}"))
    }

    async fn insert(&self, name: &str, created_at: DateTime<Utc>) -> anyhow::Result<i64> {
        let result = sqlx::query("INSERT INTO urls (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .with_context(|| format!("insert url: {name}"))?;
        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Url>> {
        sqlx::query_as::<_, Url>("SELECT id, name, created_at FROM urls WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("get url: {id}"))
    }

    async fn list_with_latest_check(&self) -> anyhow::Result<Vec<UrlSummary>> {
        sqlx::query_as::<_, UrlSummary>(
            "SELECT u.id AS id,
                    u.name AS name,
                    c.created_at AS latest_check_at,
                    c.status_code AS latest_status_code
             FROM urls u
             LEFT JOIN url_checks c ON c.id = (
                 SELECT id FROM url_checks
                 WHERE url_id = u.id
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
             )
             ORDER BY c.created_at IS NULL, c.created_at DESC, u.id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .context("list urls with latest check")
    }

    async fn list_checks(&self, url_id: i64) -> anyhow::Result<Vec<UrlCheck>> {
        sqlx::query_as::<_, UrlCheck>(
            "SELECT id, url_id, created_at, status_code, h1, title, description
             FROM url_checks
             WHERE url_id = ?
             ORDER BY created_at DESC, id DESC",
        )
        .bind(url_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("list checks for url: {url_id}"))
    }

    async fn insert_check(
        &self,
        check: &NewUrlCheck,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO url_checks (url_id, created_at, status_code, h1, title, description)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(check.url_id)
        .bind(created_at)
        .bind(check.status_code)
        .bind(check.h1.as_deref())
        .bind(check.title.as_deref())
        .bind(check.description.as_deref())
        .execute(&self.pool)
        .await
        .with_context(|| format!("insert check for url: {}", check.url_id))?;
        Ok(result.last_insert_rowid())
    }
}

/// Whether `err` carries a unique-constraint violation from the database.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<sqlx::Error>()
            .and_then(|err| err.as_database_error())
            .is_some_and(|db_err| db_err.is_unique_violation())
    })
}
