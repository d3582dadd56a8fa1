//! Error handling - maps domain failures to rendered HTML error pages.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use askama::Template;
use std::fmt;

use crate::views::ErrorPage;

/// Application-level error type. Every variant renders an HTML page; nothing
/// here is fatal to the process.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Forbidden,
    BadRequest(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let page = match self {
            AppError::NotFound(detail) => ErrorPage::new(status, detail),
            AppError::Forbidden => {
                ErrorPage::new(status, "You do not have permission to do that.")
            }
            AppError::BadRequest(detail) => ErrorPage::new(status, detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorPage::new(status, "Something went wrong. Please try again.")
            }
        };

        let body = page.render().unwrap_or_else(|_| page.detail.clone());
        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body)
    }
}

impl From<inkpost_core::DomainError> for AppError {
    fn from(err: inkpost_core::DomainError) -> Self {
        use inkpost_core::DomainError;
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Forbidden => AppError::Forbidden,
            // Field errors are handled by form redisplay; one reaching this
            // point is still a client problem, not a server one.
            DomainError::Validation { message, .. } | DomainError::Conflict { message, .. } => {
                AppError::BadRequest(message)
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
