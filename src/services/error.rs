use thiserror::Error;

use crate::database::manager::DatabaseError;

/// Typed service error: an HTTP-mappable status plus a client-safe message.
///
/// Every variant except `Database`/`Internal` is an expected domain
/// condition whose message may be shown to the client verbatim. The two
/// unexpected variants carry causes that must stay server-side; the HTTP
/// layer collapses them to a generic 500.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Validation(_) => 400,
            ServiceError::Unauthorized(_) => 401,
            ServiceError::NotFound(_) => 400,
            ServiceError::Conflict(_) => 409,
            ServiceError::Database(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// True when the message is safe to surface to the client.
    pub fn is_expected(&self) -> bool {
        !matches!(
            self,
            ServiceError::Database(_) | ServiceError::Internal(_)
        )
    }
}
