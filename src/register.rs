use chrono::Utc;

use crate::error::AppError;
use crate::flash::Flash;
use crate::normalize::parse_submission;
use crate::repository::{UrlRepository, is_unique_violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub url_id: i64,
    pub created: bool,
}

impl Registration {
    pub fn flash(self) -> Flash {
        if self.created {
            Flash::UrlAdded
        } else {
            Flash::UrlExists
        }
    }
}

/// Validates and normalizes `submitted`, then returns the stored Url for it,
/// inserting one when none exists yet.
pub async fn register_url(
    repo: &dyn UrlRepository,
    submitted: &str,
) -> Result<Registration, AppError> {
    let name = parse_submission(submitted).map_err(|error| AppError::Validation {
        submitted: submitted.to_string(),
        error,
    })?;

    if let Some(existing) = repo.find_by_name(&name).await? {
        tracing::info!(url = %name, url_id = existing.id, "url already registered");
        return Ok(Registration {
            url_id: existing.id,
            created: false,
        });
    }

    match repo.insert(&name, Utc::now()).await {
        Ok(url_id) => {
            tracing::info!(url = %name, url_id, "url registered");
            Ok(Registration {
                url_id,
                created: true,
            })
        }
        // Lost a race with a concurrent submission of the same site.
        Err(err) if is_unique_violation(&err) => {
            let existing = repo
                .find_by_name(&name)
                .await?
                .ok_or_else(|| err.context("url vanished after unique violation"))?;
            Ok(Registration {
                url_id: existing.id,
                created: false,
            })
        }
        Err(err) => Err(err.into()),
    }
}
