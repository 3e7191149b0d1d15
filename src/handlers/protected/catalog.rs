use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use serde_json::{json, Value};

use crate::dto::catalog::{AddImageRequest, CatalogCreateRequest, CatalogUpdateRequest};
use crate::error::{ApiError, ERROR_PARSE, ERROR_QUERY_PARAM};
use crate::handlers::utils::catalog_service;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ServiceError;
use crate::storage::ImageStore;

/// POST /api/v1/catalog
pub async fn create(payload: Result<Json<CatalogCreateRequest>, JsonRejection>) -> ApiResult<Value> {
    let Json(req) = payload.map_err(|_| ApiError::bad_request(ERROR_PARSE))?;

    if let Err(errors) = req.validate() {
        return Err(ApiError::from_service(
            ServiceError::Validation(errors),
            "Catalog: create",
        ));
    }

    let service = catalog_service("Catalog: create").await?;
    let id = service
        .create(&req)
        .await
        .map_err(|e| ApiError::from_service(e, "Catalog: create"))?;

    Ok(ApiResponse::created(json!({ "id": id })))
}

/// PATCH /api/v1/catalog
pub async fn update(payload: Result<Json<CatalogUpdateRequest>, JsonRejection>) -> ApiResult<Option<()>> {
    let Json(req) = payload.map_err(|_| ApiError::bad_request(ERROR_PARSE))?;

    if let Err(errors) = req.validate() {
        return Err(ApiError::from_service(
            ServiceError::Validation(errors),
            "Catalog: update",
        ));
    }

    let service = catalog_service("Catalog: update").await?;
    service
        .update(&req)
        .await
        .map_err(|e| ApiError::from_service(e, "Catalog: update"))?;

    Ok(ApiResponse::success(None))
}

/// DELETE /api/v1/catalog/:id
pub async fn remove(id: Result<Path<i64>, PathRejection>) -> ApiResult<Option<()>> {
    let Path(id) = id.map_err(|_| ApiError::bad_request(ERROR_QUERY_PARAM))?;

    let service = catalog_service("Catalog: delete").await?;
    service
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Catalog: delete"))?;

    Ok(ApiResponse::success(None))
}

/// POST /api/v1/catalog/add-image
pub async fn add_image(payload: Result<Json<AddImageRequest>, JsonRejection>) -> ApiResult<String> {
    let Json(req) = payload.map_err(|_| ApiError::bad_request(ERROR_PARSE))?;

    let store = ImageStore::from_config();
    let service = catalog_service("Catalog: add image").await?;
    let filename = service
        .add_image(&req, &store)
        .await
        .map_err(|e| ApiError::from_service(e, "Catalog: add image"))?;

    Ok(ApiResponse::success(filename))
}
