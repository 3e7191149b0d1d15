use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Tag;

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Tag>, DatabaseError>;
    async fn create(&self, name: &str, color: Option<&str>) -> Result<Tag, DatabaseError>;
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;
}

pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn find_all(&self) -> Result<Vec<Tag>, DatabaseError> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, color, is_active FROM public.tags ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    async fn create(&self, name: &str, color: Option<&str>) -> Result<Tag, DatabaseError> {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO public.tags (name, color, is_active) VALUES ($1, $2, true) \
             RETURNING id, name, color, is_active",
        )
        .bind(name)
        .bind(color)
        .fetch_one(&self.pool)
        .await?;

        Ok(tag)
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM public.tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() != 0)
    }
}
