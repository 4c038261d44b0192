use ambassadors_core::error::{CoreError, FieldError};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Message returned to clients for every non-operational failure.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{ success: false, error, code }`
/// envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ambassadors_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected request carrying its own machine-readable code.
    #[error("Bad request: {message}")]
    BadRequest { code: &'static str, message: String },

    /// A request conflicting with existing state.
    #[error("Conflict: {message}")]
    Conflict { code: &'static str, message: String },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Failure envelope. `errors` is present only for validation failures.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut retry_after = None;

        let (status, code, message, errors) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => {
                log_core_error(core);
                match core {
                    CoreError::NotFound { entity, .. } => (
                        StatusCode::NOT_FOUND,
                        core.code(),
                        format!("{entity} not found"),
                        None,
                    ),
                    CoreError::Validation(fields) => (
                        StatusCode::BAD_REQUEST,
                        core.code(),
                        "Validation failed".to_string(),
                        Some(fields.clone()),
                    ),
                    CoreError::Duplicate { message, .. } => {
                        (StatusCode::CONFLICT, core.code(), message.clone(), None)
                    }
                    CoreError::RateLimited { retry_after_secs } => {
                        retry_after = Some(*retry_after_secs);
                        (
                            StatusCode::TOO_MANY_REQUESTS,
                            core.code(),
                            "Too many requests, please try again later".to_string(),
                            None,
                        )
                    }
                    CoreError::Unauthorized(msg) => {
                        (StatusCode::UNAUTHORIZED, core.code(), msg.clone(), None)
                    }
                    CoreError::Database { .. } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        core.code(),
                        INTERNAL_MESSAGE.to_string(),
                        None,
                    ),
                }
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest { code, message } => {
                tracing::debug!(code, error = %message, "Request rejected");
                (StatusCode::BAD_REQUEST, *code, message.clone(), None)
            }
            AppError::Conflict { code, message } => {
                tracing::debug!(code, error = %message, "Request rejected");
                (StatusCode::CONFLICT, *code, message.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            success: false,
            error: message,
            code,
            errors,
        };

        let mut response = (status, axum::Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Operational errors are expected outcomes and logged quietly. Anything
/// else is a fault and carries its full detail into the log only.
fn log_core_error(err: &CoreError) {
    if err.is_operational() {
        tracing::debug!(code = err.code(), error = %err, "Request rejected");
    } else {
        tracing::error!(code = err.code(), error = %err, "Request failed");
    }
}
