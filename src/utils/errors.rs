//! Error handling for ExamGuard
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy, including the mapping of
//! errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for the ExamGuard application
#[derive(Error, Debug)]
pub enum ExamGuardError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Exam not found: {exam_id}")]
    ExamNotFound { exam_id: i64 },

    #[error("Lecturer not found: {lecturer_id}")]
    LecturerNotFound { lecturer_id: i64 },

    #[error("Attendance record not found: {record_id}")]
    AttendanceNotFound { record_id: i64 },

    #[error("Rule not found: {rule_id}")]
    RuleNotFound { rule_id: i64 },

    #[error("Checklist item not found: {item_id}")]
    ChecklistItemNotFound { item_id: i64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for ExamGuard operations
pub type Result<T> = std::result::Result<T, ExamGuardError>;

impl ExamGuardError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExamGuardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ExamGuardError::UserNotFound { .. }
            | ExamGuardError::ExamNotFound { .. }
            | ExamGuardError::LecturerNotFound { .. }
            | ExamGuardError::AttendanceNotFound { .. }
            | ExamGuardError::RuleNotFound { .. }
            | ExamGuardError::ChecklistItemNotFound { .. } => StatusCode::NOT_FOUND,
            ExamGuardError::Csv(_) => StatusCode::BAD_REQUEST,
            ExamGuardError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExamGuardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
