use std::any::Any;

use askama::Template as _;
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use tracing::{debug, error};

use crate::pages::{NotFoundTemplate, ServerErrorTemplate};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),

    #[error("Database error: {0}")]
    Database(showbook_dal::Error),
}

impl From<showbook_dal::Error> for ApiError {
    fn from(value: showbook_dal::Error) -> Self {
        match value {
            showbook_dal::Error::RecordNotFound(what) => ApiError::NotFound(what),
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(what) => {
                debug!("Not found: {what}");
                error_page(StatusCode::NOT_FOUND)
            }
            other => {
                error!("Request failed: {other}");
                error_page(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Generic error page, never contains error details
pub fn error_page(status: StatusCode) -> Response {
    let rendered = if status == StatusCode::NOT_FOUND {
        NotFoundTemplate::default().render()
    } else {
        ServerErrorTemplate::default().render()
    };
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Cannot render error page: {e}");
            (status, status.canonical_reason().unwrap_or("Error")).into_response()
        }
    }
}

/// Response for a handler that panicked
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("Handler panicked: {detail}");
    error_page(StatusCode::INTERNAL_SERVER_ERROR)
}
