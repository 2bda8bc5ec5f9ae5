use solace_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already exists")]
    DuplicateUser,
    #[error("user not found")]
    UserNotFound,
    #[error("incorrect password")]
    InvalidCredential,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("credential store error: {0}")]
    Store(DbError),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token encoding failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::DuplicateUsername => AuthError::DuplicateUser,
            other => AuthError::Store(other),
        }
    }
}
