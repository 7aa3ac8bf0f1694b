use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Course not found")]
    CourseNotFound,

    #[error("Course is full")]
    CourseFull,

    #[error("Already registered for this course")]
    AlreadyRegistered,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::CourseNotFound => {
                (StatusCode::NOT_FOUND, "Course not found".to_string())
            }
            AppError::CourseFull => (StatusCode::BAD_REQUEST, "Course is full".to_string()),
            AppError::AlreadyRegistered => (
                StatusCode::CONFLICT,
                "Already registered for this course".to_string(),
            ),
            AppError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}
