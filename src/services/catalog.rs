use crate::database::repository::CatalogRepository;
use crate::database::update::UpdateBuilder;
use crate::database::DatabaseError;
use crate::dto::catalog::{AddImageRequest, CatalogCreateRequest, CatalogResponse, CatalogUpdateRequest};
use crate::error::ERROR_NOT_FOUND_BY_ID;
use crate::services::ServiceError;
use crate::storage::{ImageStore, StorageError};

pub struct CatalogService<R> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self, image_prefix: &str) -> Result<Vec<CatalogResponse>, ServiceError> {
        let items = self.repo.find_all().await?;

        Ok(items
            .into_iter()
            .map(|item| item.into_response(image_prefix))
            .collect())
    }

    pub async fn get_by_id(
        &self,
        id: i64,
        image_prefix: &str,
    ) -> Result<CatalogResponse, ServiceError> {
        let item = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::BadRequest(ERROR_NOT_FOUND_BY_ID.to_string()))?;

        Ok(item.into_response(image_prefix))
    }

    pub async fn create(&self, req: &CatalogCreateRequest) -> Result<i64, ServiceError> {
        match self.repo.create(req).await {
            Ok(id) => Ok(id),
            Err(DatabaseError::UniqueViolation { constraint }) => {
                if constraint.contains("sku") {
                    Err(ServiceError::Conflict(format!(
                        "Provided sku: {} already exist",
                        req.sku
                    )))
                } else {
                    Err(ServiceError::Conflict("Please check provided data".to_string()))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Partial update: only the fields present in the request reach SQL.
    pub async fn update(&self, req: &CatalogUpdateRequest) -> Result<(), ServiceError> {
        let fragment = UpdateBuilder::new(false)
            .set("name", req.name.clone())
            .set("description", req.description.clone())
            .set("price", req.price)
            .set("discount_percent", req.discount_percent)
            .set("amount", req.amount)
            .set("category_id", req.category_id)
            .set("sku", req.sku.clone())
            .build(req.id);

        if fragment.is_empty() {
            return Err(ServiceError::BadRequest(
                "No fields provided for update".to_string(),
            ));
        }

        let updated = self.repo.update(&fragment).await?;
        if !updated {
            return Err(ServiceError::BadRequest(ERROR_NOT_FOUND_BY_ID.to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let deleted = self.repo.delete(id).await?;

        if !deleted {
            return Err(ServiceError::BadRequest(format!(
                "Cant delete catalog item by id: {}, please check provided id",
                id
            )));
        }

        Ok(())
    }

    /// Store an uploaded image and point the item's image_url at it.
    pub async fn add_image(
        &self,
        req: &AddImageRequest,
        store: &ImageStore,
    ) -> Result<String, ServiceError> {
        let extension = store
            .extension(&req.image)
            .map_err(|_| ServiceError::BadRequest(
                "Image extension not found. Provide correct data".to_string(),
            ))?;

        if !store.is_supported(&extension) {
            tracing::warn!(extension = %extension, "unsupported image extension");
            return Err(ServiceError::BadRequest(format!(
                "Extension of image {} not support, pls provide correct one",
                extension
            )));
        }

        let filename = store.save(&extension, &req.image).await.map_err(|e| match e {
            StorageError::Io(io) => ServiceError::Internal(io.to_string()),
            other => {
                tracing::warn!(error = %other, "image rejected");
                ServiceError::BadRequest(
                    "Something went wrong while saving image. Check provided data or try later..."
                        .to_string(),
                )
            }
        })?;

        let fragment = UpdateBuilder::new(true)
            .set("image_url", Some(filename.clone()))
            .build(req.id);

        let updated = self.repo.update(&fragment).await?;
        if !updated {
            return Err(ServiceError::BadRequest(ERROR_NOT_FOUND_BY_ID.to_string()));
        }

        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Catalog;
    use crate::database::update::UpdateFragment;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockCatalogRepo {
        items: Vec<Catalog>,
        create_result: Option<Result<i64, DatabaseError>>,
        update_result: bool,
        delete_result: bool,
        updates: Mutex<Vec<UpdateFragment>>,
    }

    #[async_trait]
    impl CatalogRepository for MockCatalogRepo {
        async fn find_all(&self) -> Result<Vec<Catalog>, DatabaseError> {
            Ok(self.items.clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Catalog>, DatabaseError> {
            Ok(self.items.iter().find(|i| i.id == id).cloned())
        }

        async fn create(&self, _: &CatalogCreateRequest) -> Result<i64, DatabaseError> {
            match &self.create_result {
                Some(Ok(id)) => Ok(*id),
                Some(Err(DatabaseError::UniqueViolation { constraint })) => {
                    Err(DatabaseError::UniqueViolation {
                        constraint: constraint.clone(),
                    })
                }
                Some(Err(_)) => Err(DatabaseError::QueryError("boom".into())),
                None => panic!("unexpected create call"),
            }
        }

        async fn update(&self, fragment: &UpdateFragment) -> Result<bool, DatabaseError> {
            self.updates.lock().unwrap().push(fragment.clone());
            Ok(self.update_result)
        }

        async fn delete(&self, _: i64) -> Result<bool, DatabaseError> {
            Ok(self.delete_result)
        }
    }

    fn item(id: i64) -> Catalog {
        Catalog {
            id,
            name: "Salsa".into(),
            description: "A jar of salsa, medium heat, 450 grams.".into(),
            price: 150.0,
            amount: 150,
            discount_percent: 0.0,
            sku: "236218361836821".into(),
            category_id: 1,
            image_url: None,
        }
    }

    fn create_request() -> CatalogCreateRequest {
        CatalogCreateRequest {
            name: "Salsa".into(),
            description: "A jar of salsa, medium heat, 450 grams.".into(),
            price: 150.0,
            amount: 150,
            discount_percent: 0.0,
            sku: "236218361836821".into(),
            category_id: 1,
        }
    }

    #[tokio::test]
    async fn update_sends_only_provided_fields() {
        let service = CatalogService::new(MockCatalogRepo {
            update_result: true,
            ..Default::default()
        });

        let req = CatalogUpdateRequest {
            id: 7,
            name: Some("Widget".into()),
            ..Default::default()
        };
        service.update(&req).await.unwrap();

        let updates = service.repo.updates.lock().unwrap();
        assert_eq!(updates[0].set_clause, "name = $2");
        assert_eq!(updates[0].params, vec![json!(7), json!("Widget")]);
    }

    #[tokio::test]
    async fn update_keeps_declaration_order_for_placeholders() {
        let service = CatalogService::new(MockCatalogRepo {
            update_result: true,
            ..Default::default()
        });

        let req = CatalogUpdateRequest {
            id: 3,
            name: Some("Widget".into()),
            amount: Some(5),
            sku: Some("1234567890".into()),
            ..Default::default()
        };
        service.update(&req).await.unwrap();

        let updates = service.repo.updates.lock().unwrap();
        assert_eq!(
            updates[0].set_clause,
            "name = $2, amount = $3, sku = $4"
        );
    }

    #[tokio::test]
    async fn noop_update_rejected_before_storage() {
        let service = CatalogService::new(MockCatalogRepo::default());
        let req = CatalogUpdateRequest {
            id: 7,
            ..Default::default()
        };

        let err = service.update(&req).await.unwrap_err();
        assert_eq!(err.status(), 400);
        assert!(service.repo.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_missing_row_reports_not_found() {
        let service = CatalogService::new(MockCatalogRepo {
            update_result: false,
            ..Default::default()
        });
        let req = CatalogUpdateRequest {
            id: 999,
            name: Some("Widget".into()),
            ..Default::default()
        };
        let err = service.update(&req).await.unwrap_err();
        assert_eq!(err.to_string(), ERROR_NOT_FOUND_BY_ID);
    }

    #[tokio::test]
    async fn create_maps_sku_constraint_to_conflict() {
        let service = CatalogService::new(MockCatalogRepo {
            create_result: Some(Err(DatabaseError::UniqueViolation {
                constraint: "catalogs_sku_key".into(),
            })),
            ..Default::default()
        });

        let err = service.create(&create_request()).await.unwrap_err();
        assert_eq!(err.status(), 409);
        assert_eq!(
            err.to_string(),
            "Provided sku: 236218361836821 already exist"
        );
    }

    #[tokio::test]
    async fn create_passes_through_unexpected_errors() {
        let service = CatalogService::new(MockCatalogRepo {
            create_result: Some(Err(DatabaseError::QueryError("boom".into()))),
            ..Default::default()
        });

        let err = service.create(&create_request()).await.unwrap_err();
        assert_eq!(err.status(), 500);
        assert!(!err.is_expected());
    }

    #[tokio::test]
    async fn delete_of_missing_row_names_the_id() {
        let service = CatalogService::new(MockCatalogRepo::default());
        let err = service.delete(13).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cant delete catalog item by id: 13, please check provided id"
        );
    }

    #[tokio::test]
    async fn get_by_id_maps_rows_and_misses() {
        let service = CatalogService::new(MockCatalogRepo {
            items: vec![item(7)],
            ..Default::default()
        });

        let resp = service.get_by_id(7, "/uploads/").await.unwrap();
        assert_eq!(resp.id, 7);

        let err = service.get_by_id(8, "/uploads/").await.unwrap_err();
        assert_eq!(err.to_string(), ERROR_NOT_FOUND_BY_ID);
    }

    #[tokio::test]
    async fn add_image_rejects_payload_without_data_uri() {
        let service = CatalogService::new(MockCatalogRepo::default());
        let store = ImageStore::new("uploads-test", vec!["png".into()], 1024);

        let req = AddImageRequest {
            id: 7,
            image: "no-prefix-here".into(),
        };
        let err = service.add_image(&req, &store).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Image extension not found. Provide correct data"
        );
    }

    #[tokio::test]
    async fn add_image_rejects_unsupported_extension() {
        let service = CatalogService::new(MockCatalogRepo::default());
        let store = ImageStore::new("uploads-test", vec!["png".into()], 1024);

        let req = AddImageRequest {
            id: 7,
            image: "data:image/tiff;base64,AAAA".into(),
        };
        let err = service.add_image(&req, &store).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Extension of image tiff not support, pls provide correct one"
        );
    }
}
