use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::{json, Value};

use crate::dto::user::{UserCreateRequest, UserLoginRequest};
use crate::error::{ApiError, ERROR_PARSE};
use crate::handlers::utils::user_service;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ServiceError;

/// POST /api/v1/user/register
pub async fn register(payload: Result<Json<UserCreateRequest>, JsonRejection>) -> ApiResult<Value> {
    let Json(req) = payload.map_err(|_| ApiError::bad_request(ERROR_PARSE))?;

    if let Err(errors) = req.validate() {
        return Err(ApiError::from_service(
            ServiceError::Validation(errors),
            "User: register",
        ));
    }

    let service = user_service("User: register").await?;
    let id = service
        .register(&req)
        .await
        .map_err(|e| ApiError::from_service(e, "User: register"))?;

    Ok(ApiResponse::created(json!({ "id": id })))
}

/// POST /api/v1/user/login
pub async fn login(payload: Result<Json<UserLoginRequest>, JsonRejection>) -> ApiResult<Value> {
    let Json(req) = payload.map_err(|_| ApiError::bad_request(ERROR_PARSE))?;

    let service = user_service("User: login").await?;
    let (user, token) = service
        .login(&req.email, &req.password)
        .await
        .map_err(|e| ApiError::from_service(e, "User: login"))?;

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": user,
    })))
}
