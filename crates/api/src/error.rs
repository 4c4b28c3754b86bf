use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mapp_genai_core::error::CoreError;
use serde::Serialize;
use serde_json::json;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain and engine errors and adds the
/// request-schema failures produced by the extractors. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mapp_genai_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The body was not JSON, or did not match the request schema.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] JsonRejection),

    /// The query string did not match the expected parameters.
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),

    /// A path segment could not be parsed.
    #[error("Invalid path parameter: {0}")]
    InvalidPath(#[from] PathRejection),

    /// Field constraints declared with `validator` were violated.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// One violated constraint, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details: Vec<FieldError> = Vec::new();

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    msg.clone(),
                ),
                CoreError::Engine(msg) | CoreError::Internal(msg) => {
                    return internal_error_response(msg);
                }
            },

            // --- Request schema errors ---
            AppError::InvalidJson(rejection) => {
                (rejection.status(), "INVALID_JSON", rejection.body_text())
            }
            AppError::InvalidQuery(rejection) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }
            AppError::InvalidPath(rejection) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }
            AppError::Validation(errors) => {
                details = field_errors(errors);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    "Request validation failed".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = if details.is_empty() {
            json!({
                "error": message,
                "code": code,
            })
        } else {
            json!({
                "error": message,
                "code": code,
                "details": details,
            })
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Log the diagnostic detail server-side and hand the caller an opaque
/// reference to it.
fn internal_error_response(detail: &str) -> Response {
    let reference = uuid::Uuid::new_v4().to_string();
    tracing::error!(error = %detail, %reference, "Internal error");

    let body = json!({
        "error": "An internal error occurred",
        "code": "INTERNAL_ERROR",
        "reference": reference,
    });

    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}

/// Flatten `validator` errors into `{field, message}` pairs, sorted by field.
fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldError {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed '{}' constraint", err.code)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}
