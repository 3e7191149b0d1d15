use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};

use crate::dto::user::{UserAddressUpdateRequest, UserGetResponse, UserUpdateRequest};
use crate::error::{ApiError, ERROR_PARSE};
use crate::handlers::utils::user_service;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::ServiceError;

/// GET /api/v1/user
pub async fn profile(Extension(auth): Extension<AuthUser>) -> ApiResult<UserGetResponse> {
    let service = user_service("User: get").await?;
    let user = service
        .profile(&auth.email)
        .await
        .map_err(|e| ApiError::from_service(e, "User: get"))?;

    Ok(ApiResponse::success(user))
}

/// PATCH /api/v1/user/profile
pub async fn update_profile(
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<UserUpdateRequest>, JsonRejection>,
) -> ApiResult<Option<()>> {
    let Json(mut req) = payload.map_err(|_| ApiError::bad_request(ERROR_PARSE))?;
    req.id = auth.user_id;

    if let Err(errors) = req.validate() {
        return Err(ApiError::from_service(
            ServiceError::Validation(errors),
            "User: update profile",
        ));
    }

    let service = user_service("User: update profile").await?;
    service
        .update_profile(&req)
        .await
        .map_err(|e| ApiError::from_service(e, "User: update profile"))?;

    Ok(ApiResponse::success(None))
}

/// POST /api/v1/user/profile/address
pub async fn update_address(
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<UserAddressUpdateRequest>, JsonRejection>,
) -> ApiResult<Option<()>> {
    let Json(mut req) = payload.map_err(|_| ApiError::bad_request(ERROR_PARSE))?;
    req.id = auth.user_id;

    if let Err(errors) = req.validate() {
        return Err(ApiError::from_service(
            ServiceError::Validation(errors),
            "User: update address",
        ));
    }

    let service = user_service("User: update address").await?;
    service
        .update_address(&req)
        .await
        .map_err(|e| ApiError::from_service(e, "User: update address"))?;

    Ok(ApiResponse::success(None))
}
