use chrono::Utc;

use crate::error::AppError;
use crate::extract::extract_metadata;
use crate::fetch::{FetchOutcome, PageFetcher};
use crate::flash::Flash;
use crate::model::NewUrlCheck;
use crate::repository::UrlRepository;

/// How a single check request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Recorded { check_id: i64, status_code: u16 },
    RecordedRemoteError { check_id: i64, status_code: u16 },
    /// The site could not be reached; nothing was stored.
    Unreachable,
    /// A response arrived but the check row could not be written.
    NotSaved,
}

impl CheckOutcome {
    pub fn flash(self) -> Flash {
        match self {
            Self::Recorded { .. } => Flash::CheckSucceeded,
            Self::RecordedRemoteError { .. } => Flash::CheckRemoteError,
            Self::Unreachable => Flash::CheckUnreachable,
            Self::NotSaved => Flash::CheckNotSaved,
        }
    }
}

/// Fetches the Url with id `url_id`, extracts page metadata and records a check.
///
/// Only an unknown id or a failure to look the Url up is returned as an error;
/// every other ending is a [`CheckOutcome`] the caller turns into a notice.
pub async fn run_check(
    repo: &dyn UrlRepository,
    fetcher: &PageFetcher,
    url_id: i64,
) -> Result<CheckOutcome, AppError> {
    let url = repo.get(url_id).await?.ok_or(AppError::NotFound)?;

    let outcome = fetcher.fetch(&url.name).await;
    let remote_error = matches!(outcome, FetchOutcome::RemoteError(_));
    let page = match outcome {
        FetchOutcome::Success(page) | FetchOutcome::RemoteError(page) => page,
        FetchOutcome::ConnectionFailure(err) => {
            tracing::warn!(url = %url.name, ?err, "site unreachable");
            return Ok(CheckOutcome::Unreachable);
        }
    };

    let status_code = page.status.as_u16();
    let metadata = extract_metadata(&page.body);
    let check = NewUrlCheck {
        url_id: url.id,
        status_code: Some(i64::from(status_code)),
        h1: metadata.h1,
        title: metadata.title,
        description: metadata.description,
    };

    let check_id = match repo.insert_check(&check, Utc::now()).await {
        Ok(id) => id,
        Err(err) => {
            tracing::error!(url = %url.name, ?err, "failed to save check");
            return Ok(CheckOutcome::NotSaved);
        }
    };
    tracing::info!(url = %url.name, check_id, status_code, "check recorded");

    Ok(if remote_error {
        CheckOutcome::RecordedRemoteError {
            check_id,
            status_code,
        }
    } else {
        CheckOutcome::Recorded {
            check_id,
            status_code,
        }
    })
}
