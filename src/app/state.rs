use std::sync::Arc;

use crate::config::Config;
use crate::fetch::PageFetcher;
use crate::repository::{SqliteUrlRepository, UrlRepository};

/// Process-wide collaborators handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn UrlRepository>,
    pub fetcher: PageFetcher,
}

impl AppState {
    pub fn new(repo: Arc<dyn UrlRepository>, fetcher: PageFetcher) -> Self {
        Self { repo, fetcher }
    }

    /// Connects to the configured database and builds the outbound client.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let pool = crate::db::connect(&config.database_url).await?;
        let repo: Arc<dyn UrlRepository> = Arc::new(SqliteUrlRepository::new(pool));
        let fetcher = PageFetcher::new(config.fetch_timeout, config.max_body_bytes)?;
        Ok(Self::new(repo, fetcher))
    }
}
