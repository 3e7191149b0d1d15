use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;

use crate::dto::taxonomy::{CategoryRequest, CategoryResponse, TagRequest, TagResponse};
use crate::error::{ApiError, ERROR_PARSE, ERROR_QUERY_PARAM};
use crate::handlers::utils::{category_service, tag_service};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/v1/tag/all
pub async fn tag_list() -> ApiResult<Vec<TagResponse>> {
    let service = tag_service("Tag: get all").await?;
    let tags = service
        .get_all()
        .await
        .map_err(|e| ApiError::from_service(e, "Tag: get all"))?;

    Ok(ApiResponse::success(tags))
}

/// POST /api/v1/tag
pub async fn tag_create(payload: Result<Json<TagRequest>, JsonRejection>) -> ApiResult<TagResponse> {
    let Json(req) = payload.map_err(|_| ApiError::bad_request(ERROR_PARSE))?;

    let service = tag_service("Tag: create").await?;
    let tag = service
        .create(&req)
        .await
        .map_err(|e| ApiError::from_service(e, "Tag: create"))?;

    Ok(ApiResponse::created(tag))
}

/// DELETE /api/v1/tag/:id
pub async fn tag_delete(id: Result<Path<i64>, PathRejection>) -> ApiResult<Option<()>> {
    let Path(id) = id.map_err(|_| ApiError::bad_request(ERROR_QUERY_PARAM))?;

    let service = tag_service("Tag: delete").await?;
    service
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Tag: delete"))?;

    Ok(ApiResponse::success(None))
}

/// GET /api/v1/category/all
pub async fn category_list() -> ApiResult<Vec<CategoryResponse>> {
    let service = category_service("Category: get all").await?;
    let categories = service
        .get_all()
        .await
        .map_err(|e| ApiError::from_service(e, "Category: get all"))?;

    Ok(ApiResponse::success(categories))
}

/// POST /api/v1/category
pub async fn category_create(
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<CategoryResponse> {
    let Json(req) = payload.map_err(|_| ApiError::bad_request(ERROR_PARSE))?;

    let service = category_service("Category: create").await?;
    let category = service
        .create(&req)
        .await
        .map_err(|e| ApiError::from_service(e, "Category: create"))?;

    Ok(ApiResponse::created(category))
}

/// DELETE /api/v1/category/:id
pub async fn category_delete(id: Result<Path<i64>, PathRejection>) -> ApiResult<Option<()>> {
    let Path(id) = id.map_err(|_| ApiError::bad_request(ERROR_QUERY_PARAM))?;

    let service = category_service("Category: delete").await?;
    service
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Category: delete"))?;

    Ok(ApiResponse::success(None))
}
