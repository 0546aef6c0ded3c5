use chrono::{DateTime, Utc};

/// A monitored site root, stored as `scheme://host`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Url {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One check result. `status_code` is absent when the target could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlCheck {
    pub id: i64,
    pub url_id: i64,
    pub created_at: DateTime<Utc>,
    pub status_code: Option<i64>,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Listing row: a Url with its most recent check, if any.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlSummary {
    pub id: i64,
    pub name: String,
    pub latest_check_at: Option<DateTime<Utc>>,
    pub latest_status_code: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUrlCheck {
    pub url_id: i64,
    pub status_code: Option<i64>,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}
