//! Error responses - RFC 7807 JSON for the API, HTML pages for the site.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use std::fmt;
use writer_shared::ErrorResponse;

use crate::views;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(detail) => ErrorResponse::unprocessable(detail),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<writer_core::DomainError> for AppError {
    fn from(err: writer_core::DomainError) -> Self {
        match err {
            writer_core::DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            writer_core::DomainError::Validation(msg) => AppError::Validation(msg),
            writer_core::DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<writer_core::RepoError> for AppError {
    fn from(err: writer_core::RepoError) -> Self {
        match err {
            writer_core::RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            writer_core::RepoError::Constraint(msg) => AppError::Conflict(msg),
            writer_core::RepoError::Connection(msg) => {
                tracing::error!("Post store connection error: {}", msg);
                AppError::Internal("Storage error".to_string())
            }
            writer_core::RepoError::Query(msg) | writer_core::RepoError::Decode(msg) => {
                tracing::error!("Post store query error: {}", msg);
                AppError::Internal("Storage error".to_string())
            }
        }
    }
}

/// Result type alias for API handlers.
pub type AppResult<T> = Result<T, AppError>;

/// The same failures, rendered as an HTML page for browser routes.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl From<writer_core::RepoError> for PageError {
    fn from(err: writer_core::RepoError) -> Self {
        PageError(err.into())
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let message = match &self.0 {
            AppError::NotFound(_) => "ページが見つかりません",
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "エラーが発生しました"
            }
            _ => "リクエストを処理できませんでした",
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(views::error_page(message))
    }
}

/// Result type alias for page handlers.
pub type PageResult<T> = Result<T, PageError>;
