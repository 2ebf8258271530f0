use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use crate::assessment::{ASSESSMENT_FAILURE_NOTICE, UnknownFieldError};
use crate::session::SessionError;

/// Custom error type for the application
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// Required form fields left blank, by wire name
    ValidationError(Vec<String>),
    Conflict(String),
    /// Cause is logged when the failure is converted; the client only sees the notice
    AssessmentFailed,
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, fields) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::ValidationError(fields) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Please fill in all required fields".to_string(),
                Some(fields),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            AppError::AssessmentFailed => (
                StatusCode::BAD_GATEWAY,
                "ASSESSMENT_FAILED",
                ASSESSMENT_FAILURE_NOTICE.to_string(),
                None,
            ),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            fields,
        });

        (status, body).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::MissingFields(fields) => {
                let names: Vec<String> = fields.iter().map(|f| f.as_str().to_string()).collect();
                warn!("Assessment blocked, missing fields: {}", names.join(", "));
                AppError::ValidationError(names)
            }
            SessionError::AssessmentFailed(failure) => {
                error!("Assessment failed: {}", failure.reason());
                AppError::AssessmentFailed
            }
            other => AppError::Conflict(other.to_string()),
        }
    }
}

impl From<UnknownFieldError> for AppError {
    fn from(err: UnknownFieldError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Result type for application handlers
pub type AppResult<T> = Result<T, AppError>;
