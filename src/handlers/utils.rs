use crate::database::repository::{
    PgCatalogRepository, PgCategoryRepository, PgTagRepository, PgUserRepository,
};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::services::{CatalogService, CategoryService, ServiceError, TagService, UserService};

// Services are constructed fresh per request over the shared pool; a pool
// failure goes through the chokepoint like any other unexpected error.

pub async fn user_service(operation: &str) -> Result<UserService<PgUserRepository>, ApiError> {
    let pool = DatabaseManager::pool()
        .await
        .map_err(|e| ApiError::from_service(ServiceError::Database(e), operation))?;
    Ok(UserService::new(PgUserRepository::new(pool)))
}

pub async fn catalog_service(
    operation: &str,
) -> Result<CatalogService<PgCatalogRepository>, ApiError> {
    let pool = DatabaseManager::pool()
        .await
        .map_err(|e| ApiError::from_service(ServiceError::Database(e), operation))?;
    Ok(CatalogService::new(PgCatalogRepository::new(pool)))
}

pub async fn tag_service(operation: &str) -> Result<TagService<PgTagRepository>, ApiError> {
    let pool = DatabaseManager::pool()
        .await
        .map_err(|e| ApiError::from_service(ServiceError::Database(e), operation))?;
    Ok(TagService::new(PgTagRepository::new(pool)))
}

pub async fn category_service(
    operation: &str,
) -> Result<CategoryService<PgCategoryRepository>, ApiError> {
    let pool = DatabaseManager::pool()
        .await
        .map_err(|e| ApiError::from_service(ServiceError::Database(e), operation))?;
    Ok(CategoryService::new(PgCategoryRepository::new(pool)))
}
