use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;
use tracing::error;

use crate::models::Notice;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Incorrect username or password")]
    Unauthorized,

    #[error("Library API error: {0}")]
    Api(String),

    #[error("Book lookup error: {0}")]
    Lookup(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// The notice a user sees for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            AppError::Validation(msg) => Notice::warning("Warning!", msg.clone()),
            AppError::NotFound(what) => Notice::error("Not Found", format!("{} no longer exists.", what)),
            AppError::Unauthorized => {
                Notice::error("Access Denied", "Incorrect username or password!")
            }
            AppError::Api(_) => Notice::error("Error", "Check Connection"),
            AppError::Lookup(_) => Notice::error("Error", "Error in API connection!"),
            AppError::Storage(_) | AppError::Config(_) => {
                Notice::error("Error", "Internal server error")
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Api(_) | AppError::Lookup(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Api(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Storage(e) => error!("storage error: {}", e),
            AppError::Config(msg) => error!("configuration error: {}", msg),
            AppError::Api(msg) | AppError::Lookup(msg) => error!("upstream error: {}", msg),
            AppError::Validation(_) | AppError::NotFound(_) | AppError::Unauthorized => {}
        }

        (self.status(), Json(self.notice())).into_response()
    }
}
