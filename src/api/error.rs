use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::errors::{tracker_error, TrackerError};

/// Error returned by handlers; domain failures map to client errors and
/// everything else is logged and reported as a 500.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    NotFound(String),
    Internal(anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        Self::Internal(error)
    }
}

impl From<TrackerError> for ApiError {
    fn from(error: TrackerError) -> Self {
        Self::Internal(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Self::NotFound(what) => (StatusCode::NOT_FOUND, what.clone()),
            Self::Internal(error) => match tracker_error(error) {
                Some(domain) => (status_for(domain), domain.to_string()),
                None => {
                    log::error!("Request failed: {:?}", error);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn status_for(error: &TrackerError) -> StatusCode {
    match error {
        TrackerError::IncompleteScoreline => StatusCode::UNPROCESSABLE_ENTITY,
        TrackerError::MissingIdentity => StatusCode::UNAUTHORIZED,
        TrackerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        TrackerError::EmailTaken => StatusCode::CONFLICT,
        TrackerError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        TrackerError::MatchNotFound(_) => StatusCode::NOT_FOUND,
    }
}
