/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the
/// appropriate status code and a JSON body.
///
/// Validation failures carry field + reason pairs; the rendered message is
/// the humanized field followed by the reason, matching the strings users
/// see ("Title can't be blank", "Email has already been taken").

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Validation reason for a missing value
pub const BLANK: &str = "can't be blank";

/// Validation reason for a uniqueness conflict
pub const TAKEN: &str = "has already been taken";

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401) - "Login required" or "Login failed"
    Unauthorized(String),

    /// Forbidden (403) - "Forbidden access."
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation (snake_case)
    pub field: String,

    /// Reason, phrased to follow the field name
    pub message: String,
}

impl ValidationErrorDetail {
    /// Creates a detail from a field and reason
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A missing-value failure, e.g. `blank("title")` → "Title can't be blank"
    pub fn blank(field: impl Into<String>) -> Self {
        Self::new(field, BLANK)
    }

    /// A uniqueness failure, e.g. `taken("email")` → "Email has already been taken"
    pub fn taken(field: impl Into<String>) -> Self {
        Self::new(field, TAKEN)
    }

    /// Renders the user-visible message: humanized field + reason
    pub fn full_message(&self) -> String {
        format!("{} {}", humanize(&self.field), self.message)
    }
}

/// Turns a snake_case field name into its display form
///
/// "password_confirmation" → "Password confirmation"
fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "unauthorized", "validation_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::ValidationError(errors) => {
                let message = errors
                    .iter()
                    .map(ValidationErrorDetail::full_message)
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "validation_error",
                    message,
                    Some(errors),
                )
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Unique-index violations are the storage-layer backstop for the
/// application-level taken checks: a race loser gets the same
/// "has already been taken" validation error as a sequential duplicate.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::ValidationError(vec![ValidationErrorDetail::taken(
                            "email",
                        )]);
                    }
                    if constraint.contains("title") {
                        return ApiError::ValidationError(vec![ValidationErrorDetail::taken(
                            "title",
                        )]);
                    }
                    return ApiError::InternalError(format!(
                        "Constraint violation: {}",
                        constraint
                    ));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert request-validation failures to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "is invalid".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}

/// Convert authorization errors to API errors
impl From<taskdeck_shared::auth::authorization::AuthzError> for ApiError {
    fn from(err: taskdeck_shared::auth::authorization::AuthzError) -> Self {
        use taskdeck_shared::auth::authorization::AuthzError;

        match err {
            AuthzError::LoginRequired => ApiError::Unauthorized(err.to_string()),
            AuthzError::Forbidden => ApiError::Forbidden(err.to_string()),
            AuthzError::DatabaseError(e) => ApiError::InternalError(format!("Database error: {}", e)),
        }
    }
}

/// Convert password errors to API errors
impl From<taskdeck_shared::auth::password::PasswordError> for ApiError {
    fn from(err: taskdeck_shared::auth::password::PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_shared::auth::authorization::AuthzError;

    #[test]
    fn test_error_display() {
        let err = ApiError::Unauthorized("Login failed".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Login failed");

        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");
    }

    #[test]
    fn test_full_message_blank() {
        assert_eq!(
            ValidationErrorDetail::blank("title").full_message(),
            "Title can't be blank"
        );
        assert_eq!(
            ValidationErrorDetail::blank("email").full_message(),
            "Email can't be blank"
        );
        assert_eq!(
            ValidationErrorDetail::blank("status").full_message(),
            "Status can't be blank"
        );
    }

    #[test]
    fn test_full_message_taken() {
        assert_eq!(
            ValidationErrorDetail::taken("title").full_message(),
            "Title has already been taken"
        );
        assert_eq!(
            ValidationErrorDetail::taken("email").full_message(),
            "Email has already been taken"
        );
    }

    #[test]
    fn test_full_message_multi_word_field() {
        let detail = ValidationErrorDetail::new("password_confirmation", "doesn't match Password");
        assert_eq!(
            detail.full_message(),
            "Password confirmation doesn't match Password"
        );
    }

    #[test]
    fn test_validation_error_response_status() {
        let err = ApiError::ValidationError(vec![ValidationErrorDetail::blank("title")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_authz_error_conversion() {
        let err: ApiError = AuthzError::LoginRequired.into();
        assert!(matches!(err, ApiError::Unauthorized(msg) if msg == "Login required"));

        let err: ApiError = AuthzError::Forbidden.into();
        assert!(matches!(err, ApiError::Forbidden(msg) if msg == "Forbidden access."));
    }
}
