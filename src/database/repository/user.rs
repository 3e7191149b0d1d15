use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::UserFullInfo;
use crate::database::update::{bind_value, UpdateFragment};

/// Storage seam for accounts. The boolean results report "a row was
/// actually affected", kept distinct from query failures so callers can
/// tell a missing row from a broken database.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<i64, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserFullInfo>, DatabaseError>;

    async fn update(&self, fragment: &UpdateFragment) -> Result<bool, DatabaseError>;
}

const SELECT_BY_EMAIL: &str = "SELECT id, email, username, password, role_code, first_name, \
     second_name, phone_number, apartment, house, street, city, region \
     FROM public.users WHERE email = $1";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<i64, DatabaseError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO public.users (email, username, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserFullInfo>, DatabaseError> {
        let user = sqlx::query_as::<_, UserFullInfo>(SELECT_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update(&self, fragment: &UpdateFragment) -> Result<bool, DatabaseError> {
        let query = format!(
            "UPDATE public.users SET {} WHERE id = $1",
            fragment.set_clause
        );

        let mut q = sqlx::query(&query);
        for param in fragment.params.iter() {
            q = bind_value(q, param);
        }

        let result = q.execute(&self.pool).await?;
        Ok(result.rows_affected() != 0)
    }
}
