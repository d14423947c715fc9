use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::UserId;

/// Application-level errors
///
/// Domain outcomes (`UnknownUser`, `UnknownAisle`, `InvalidParameter`) are
/// recoverable at the request boundary; `Scoring` covers unexpected model
/// faults. "No candidates" is deliberately not here: it is a valid outcome,
/// see [`crate::models::RecommendationOutcome`].
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("User ID {0} not found.")]
    UnknownUser(UserId),

    #[error("No products found in aisle '{0}'.")]
    UnknownAisle(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Scoring failed: {0}")]
    Scoring(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Scoring(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::UnknownUser(_) | AppError::UnknownAisle(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Scoring(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
