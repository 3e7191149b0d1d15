use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Catalog;
use crate::database::update::{bind_value, UpdateFragment};
use crate::dto::catalog::CatalogCreateRequest;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Catalog>, DatabaseError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Catalog>, DatabaseError>;
    async fn create(&self, item: &CatalogCreateRequest) -> Result<i64, DatabaseError>;
    async fn update(&self, fragment: &UpdateFragment) -> Result<bool, DatabaseError>;
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;
}

const COLUMNS: &str =
    "id, name, description, price, amount, discount_percent, sku, category_id, image_url";

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn find_all(&self) -> Result<Vec<Catalog>, DatabaseError> {
        let items = sqlx::query_as::<_, Catalog>(&format!(
            "SELECT {} FROM public.catalogs ORDER BY id",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Catalog>, DatabaseError> {
        let item = sqlx::query_as::<_, Catalog>(&format!(
            "SELECT {} FROM public.catalogs WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn create(&self, item: &CatalogCreateRequest) -> Result<i64, DatabaseError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO public.catalogs \
             (name, description, price, amount, discount_percent, sku, category_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(item.amount)
        .bind(item.discount_percent)
        .bind(&item.sku)
        .bind(item.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, fragment: &UpdateFragment) -> Result<bool, DatabaseError> {
        let query = format!(
            "UPDATE public.catalogs SET {} WHERE id = $1",
            fragment.set_clause
        );

        let mut q = sqlx::query(&query);
        for param in fragment.params.iter() {
            q = bind_value(q, param);
        }

        let result = q.execute(&self.pool).await?;
        Ok(result.rows_affected() != 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM public.catalogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() != 0)
    }
}
