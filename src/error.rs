//! Error handling

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::authenticate::AuthError;
use crate::render;

pub type AppResult<T> = Result<T, AppError>;

/// Failures that replace the whole page
#[derive(Debug, Error)]
pub enum AppError {
    // Request body could not be decoded at all
    #[error("{0}")]
    BadRequest(String),

    // Classifier broke its output contract
    #[error("{0}")]
    InferenceIntegrity(String),

    #[error("{0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InferenceIntegrity(msg) => {
                tracing::error!("Inference integrity error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Html(render::error_page(status, &self.to_string()));
        (status, body).into_response()
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnexpectedOutput(_) => AppError::InferenceIntegrity(err.to_string()),
            other => AppError::InternalError(format!("unhandled rejection: {}", other)),
        }
    }
}
