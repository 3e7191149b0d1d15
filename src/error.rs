// HTTP API error type and the uniform error envelope
use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::panic::Location;
use uuid::Uuid;

use crate::services::ServiceError;

/// Fixed client-facing messages for conditions whose real cause stays
/// server-side.
pub const ERROR_500: &str = "Something went wrong, try later...";
pub const ERROR_PARSE: &str = "Cant parse data, please check provided data";
pub const ERROR_NOT_FOUND_BY_ID: &str = "Nothing found, please check the provided id";
pub const ERROR_QUERY_PARAM: &str = "Please check provided params";
pub const ERROR_AUTHORIZE: &str = "Cannot authorize with this token. Please log in again.";

/// HTTP error carrying a status, a client-safe message, and the source
/// location that raised it. Rendering through `IntoResponse` produces the
/// uniform error envelope; handlers never write error bodies directly.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    path: String,
}

impl ApiError {
    #[track_caller]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let caller = Location::caller();
        Self {
            status,
            message: message.into(),
            path: format!("{}:{}", caller.file(), caller.line()),
        }
    }

    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[track_caller]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    #[track_caller]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    #[track_caller]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ERROR_500)
    }

    /// The single chokepoint between service errors and HTTP responses.
    ///
    /// Expected domain errors surface their own status and message. Anything
    /// unexpected is logged with the operation name for correlation and
    /// collapses to a generic 500 — raw driver/storage detail never reaches
    /// the client.
    #[track_caller]
    pub fn from_service(err: ServiceError, operation: &str) -> Self {
        match err {
            ServiceError::Database(ref cause) => {
                tracing::error!(operation, error = %cause, "unexpected service failure");
                Self::internal()
            }
            ServiceError::Internal(ref cause) => {
                tracing::error!(operation, error = %cause, "unexpected service failure");
                Self::internal()
            }
            expected => Self::new(
                StatusCode::from_u16(expected.status()).unwrap_or(StatusCode::BAD_REQUEST),
                expected.to_string(),
            ),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Error envelope body. Every error response is exactly this shape:
    /// status, message(s), failure flag, correlation id, timestamp, and the
    /// call site that raised the error (for log cross-referencing without a
    /// stack trace).
    pub fn to_json(&self) -> Value {
        json!({
            "status": self.status.as_u16(),
            "errors": self.message,
            "success": false,
            "time": Utc::now(),
            "id": Uuid::new_v4(),
            "path": self.path,
        })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::manager::DatabaseError;

    #[test]
    fn envelope_carries_correlation_fields() {
        let err = ApiError::bad_request("boom");
        let body = err.to_json();

        assert_eq!(body["status"], 400);
        assert_eq!(body["errors"], "boom");
        assert_eq!(body["success"], false);
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert!(!body["time"].as_str().unwrap().is_empty());
        assert!(body["path"].as_str().unwrap().contains("error.rs"));
    }

    #[test]
    fn expected_service_errors_surface_verbatim() {
        let err = ApiError::from_service(
            ServiceError::Conflict("Provided sku: X already exist".into()),
            "Catalog: create",
        );
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.message(), "Provided sku: X already exist");

        let err = ApiError::from_service(
            ServiceError::Validation(vec!["[Name] - too short".into(), "[Sku] - bad".into()]),
            "Catalog: create",
        );
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "[Name] - too short; [Sku] - bad");
    }

    #[test]
    fn unexpected_errors_collapse_to_generic_500() {
        let err = ApiError::from_service(
            ServiceError::Database(DatabaseError::QueryError("relation missing".into())),
            "Catalog: update",
        );
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), ERROR_500);
        // internal detail must not leak
        assert!(!err.to_json()["errors"]
            .as_str()
            .unwrap()
            .contains("relation"));
    }
}
