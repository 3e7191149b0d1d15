use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors surfaced from the storage layer.
///
/// Driver errors are classified here so the service layer never inspects
/// error message text: a unique-constraint violation becomes its own
/// variant carrying the violated constraint name.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // Postgres class 23505: unique_violation
            if db_err.code().as_deref() == Some("23505") {
                return DatabaseError::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        DatabaseError::Sqlx(err)
    }
}

impl DatabaseError {
    /// Name of the violated unique constraint, when this error is one.
    pub fn violated_constraint(&self) -> Option<&str> {
        match self {
            DatabaseError::UniqueViolation { constraint } => Some(constraint),
            _ => None,
        }
    }
}

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Process-wide connection pool, created lazily on first use.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Get the shared pool. The pool is constructed lazily so the server
    /// can start (and answer health checks) before the database is up;
    /// physical connections open on first query.
    pub async fn pool() -> Result<PgPool, DatabaseError> {
        let pool = POOL
            .get_or_try_init(|| async {
                let cfg = &config::config().database;
                if cfg.url.is_empty() {
                    return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
                }

                let pool = PgPoolOptions::new()
                    .max_connections(cfg.max_connections)
                    .acquire_timeout(Duration::from_secs(cfg.connection_timeout))
                    .connect_lazy(&cfg.url)?;

                info!("Created database pool");
                Ok::<_, DatabaseError>(pool)
            })
            .await?;

        Ok(pool.clone())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_non_database_errors_as_sqlx() {
        let err: DatabaseError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DatabaseError::Sqlx(_)));
        assert!(err.violated_constraint().is_none());
    }

    #[test]
    fn unique_violation_exposes_constraint() {
        let err = DatabaseError::UniqueViolation {
            constraint: "users_email_key".to_string(),
        };
        assert_eq!(err.violated_constraint(), Some("users_email_key"));
    }
}
