// HTTP API Error Types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::database::DatabaseError;
use crate::notes::{FieldError, NoteError};

/// HTTP API error with the status codes and bodies note clients expect
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(Vec<FieldError>),
    InvalidJson(String),

    // 401 Unauthorized: no usable credential
    Unauthorized(String),

    // 401 Unauthorized: authenticated, but not the note's owner
    NotAllowed,

    // 404 Not Found
    NotFound,

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotAllowed => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(_) => "Validation failed",
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotAllowed => "Not Allowed",
            ApiError::NotFound => "Not Found",
            ApiError::InternalServerError(_) => "Internal Server Error",
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// JSON body, for the variants that answer in JSON
    pub fn to_json(&self) -> Option<Value> {
        match self {
            ApiError::ValidationError(errors) => Some(json!({ "errors": errors })),
            ApiError::InvalidJson(msg) | ApiError::Unauthorized(msg) => {
                Some(json!({ "error": msg }))
            }
            ApiError::ServiceUnavailable(msg) => Some(json!({ "status": "degraded", "error": msg })),
            ApiError::NotAllowed | ApiError::NotFound | ApiError::InternalServerError(_) => None,
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    /// `detail` is logged, never sent to the client
    pub fn internal_server_error(detail: impl Into<String>) -> Self {
        ApiError::InternalServerError(detail.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::Validation(errors) => ApiError::ValidationError(errors),
            NoteError::NotFound => ApiError::NotFound,
            NoteError::NotAllowed => ApiError::NotAllowed,
            NoteError::Database(db) => db.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return generic message
        tracing::error!("Note store error: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InternalServerError(detail) => write!(f, "Internal Server Error: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.to_json() {
            Some(body) => (status, Json(body)).into_response(),
            None => (status, self.message().to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::validation::TITLE;

    #[test]
    fn maps_note_errors_to_statuses() {
        assert_eq!(ApiError::from(NoteError::NotFound).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(NoteError::NotAllowed).status_code(), StatusCode::UNAUTHORIZED);

        let errors = vec![TITLE.check("x").unwrap()];
        let api = ApiError::from(NoteError::Validation(errors));
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api.to_json().unwrap()["errors"][0]["msg"], "Enter a Valid title");
    }

    #[test]
    fn store_faults_hide_details() {
        let api = ApiError::from(DatabaseError::InvalidDatabaseUrl);
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message(), "Internal Server Error");
        assert!(api.to_json().is_none());
    }

    #[test]
    fn ownership_errors_are_plain_text() {
        let response = ApiError::NotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    }
}
