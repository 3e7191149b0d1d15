use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Wrapper for API responses that automatically adds the success envelope.
/// Every successful response body is `{status, data, success: true}` —
/// handlers return this instead of writing bodies themselves.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: StatusCode::OK,
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self { data, status_code }
    }

    /// Create a 201 Created response
    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    /// Envelope body for this response.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let data = serde_json::to_value(&self.data)?;
        Ok(envelope(self.status_code, data))
    }
}

/// The fixed success envelope shape.
fn envelope(status: StatusCode, data: Value) -> Value {
    json!({
        "status": status.as_u16(),
        "data": data,
        "success": true,
    })
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code;

        let body = match self.to_json() {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return crate::error::ApiError::internal().into_response();
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Handler return type: success envelope or error envelope, nothing else.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
