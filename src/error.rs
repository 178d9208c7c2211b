use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to fetch URL: {0}")]
    FetchError(String),

    #[error("Failed to extract text: {0}")]
    ExtractError(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    EmptyDocument(String),

    #[error("Invalid summary mode '{0}'")]
    InvalidMode(String),

    #[error("Summarization failed: {0}")]
    UpstreamError(String),

    #[error("Database error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidInput(_)
            | AppError::FetchError(_)
            | AppError::UnsupportedFileType(_)
            | AppError::EmptyDocument(_)
            | AppError::InvalidMode(_) => StatusCode::BAD_REQUEST,
            AppError::ExtractError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamError(_)
            | AppError::StorageError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
