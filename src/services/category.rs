use crate::database::repository::CategoryRepository;
use crate::dto::taxonomy::{CategoryRequest, CategoryResponse};
use crate::services::ServiceError;

pub struct CategoryService<R> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let categories = self.repo.find_all().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn create(&self, req: &CategoryRequest) -> Result<CategoryResponse, ServiceError> {
        let category = self.repo.create(&req.code, &req.name).await?;
        Ok(CategoryResponse::from(category))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let deleted = self.repo.delete(id).await?;

        if !deleted {
            return Err(ServiceError::BadRequest(format!(
                "Entity not found with id {}",
                id
            )));
        }

        Ok(())
    }
}
