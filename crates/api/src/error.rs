//! Handler error type and its mapping onto the failure envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracareer_core::error::CoreError;
use tracareer_core::response::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request that never reached domain validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// `{ "success": false, "error": ..., "code": ... }`
///
/// Clients only show `error`; `code` is there for logs and tests.
#[derive(Debug, Serialize)]
struct FailureBody {
    #[serde(flatten)]
    envelope: ApiResponse<()>,
    code: &'static str,
}

/// Status, machine code and client-facing message for one error.
struct Classified {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Classified {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Generic 500. The real cause is logged by the caller.
    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl AppError {
    fn classify(&self) -> Classified {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => Classified::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                Classified::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.as_str())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                Classified::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.as_str())
            }
            AppError::Core(CoreError::Internal(msg)) | AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                Classified::internal()
            }
            AppError::Database(err) => classify_database(err),
            AppError::BadRequest(msg) => {
                Classified::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.as_str())
            }
        }
    }
}

/// Missing rows are 404s and CHECK violations (SQLSTATE `23514`) are
/// validation failures. Anything else is logged and hidden.
fn classify_database(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => {
            Classified::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23514") => {
            let constraint = db.constraint().unwrap_or("unknown");
            tracing::debug!(constraint, "Check constraint rejected write");
            Classified::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Value rejected by {constraint}"),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            Classified::internal()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Classified {
            status,
            code,
            message,
        } = self.classify();
        let body = FailureBody {
            envelope: ApiResponse::failure(message),
            code,
        };
        (status, Json(body)).into_response()
    }
}
