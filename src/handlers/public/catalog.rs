use axum::extract::rejection::PathRejection;
use axum::extract::Path;

use crate::dto::catalog::CatalogResponse;
use crate::error::{ApiError, ERROR_QUERY_PARAM};
use crate::handlers::utils::catalog_service;
use crate::middleware::{ApiResponse, ApiResult};
use crate::storage::ImageStore;

/// GET /api/v1/catalog/all
pub async fn get_all() -> ApiResult<Vec<CatalogResponse>> {
    let prefix = ImageStore::from_config().url_prefix();

    let service = catalog_service("Catalog: get all").await?;
    let items = service
        .get_all(&prefix)
        .await
        .map_err(|e| ApiError::from_service(e, "Catalog: get all"))?;

    Ok(ApiResponse::success(items))
}

/// GET /api/v1/catalog/:id
pub async fn get_by_id(id: Result<Path<i64>, PathRejection>) -> ApiResult<CatalogResponse> {
    let Path(id) = id.map_err(|_| ApiError::bad_request(ERROR_QUERY_PARAM))?;
    let prefix = ImageStore::from_config().url_prefix();

    let service = catalog_service("Catalog: get by id").await?;
    let item = service
        .get_by_id(id, &prefix)
        .await
        .map_err(|e| ApiError::from_service(e, "Catalog: get by id"))?;

    Ok(ApiResponse::success(item))
}
