use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::logic::RuleViolation;

/// Every failure a handler can report. Responses carry a plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    /// `"<Entity> not found."`
    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(format!("{entity} not found."))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rule(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Store(e) => {
                log::error!("Store operation failed: {e:#}");
                (status, "Internal server error.".to_string()).into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}
