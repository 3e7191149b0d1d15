use crate::database::repository::TagRepository;
use crate::dto::taxonomy::{TagRequest, TagResponse};
use crate::services::ServiceError;

pub struct TagService<R> {
    repo: R,
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<TagResponse>, ServiceError> {
        let tags = self.repo.find_all().await?;
        Ok(tags.into_iter().map(TagResponse::from).collect())
    }

    pub async fn create(&self, req: &TagRequest) -> Result<TagResponse, ServiceError> {
        let tag = self.repo.create(&req.name, req.color.as_deref()).await?;
        Ok(TagResponse::from(tag))
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
