use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::app::views;
use crate::normalize::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "Страница не найдена!";
const INTERNAL_MESSAGE: &str = "Внутренняя ошибка сервера";

/// Request-level failures that end in something other than a redirect.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid url submission {submitted:?}: {error}")]
    Validation {
        submitted: String,
        error: ValidationError,
    },
    #[error("url not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation { submitted, error } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::index_page(None, &submitted, Some(&error))),
            )
                .into_response(),
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response(),
            Self::Internal(err) => {
                tracing::error!(?err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        let validation = AppError::Validation {
            submitted: String::new(),
            error: ValidationError::Empty,
        };
        assert_eq!(
            validation.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("db gone"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
