/*
 * Responsibility
 * - The meaning a repo hands to the layers above it
 * - sqlx errors are classified here, never further up
 */
use thiserror::Error;

// Postgres unique_violation
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("user profile already exists")]
    Conflict,

    #[error("profile not found")]
    NotFound,

    #[error("error create user-profile")]
    CreateFailed(#[source] sqlx::Error),

    #[error("error update user-profile")]
    UpdateFailed(#[source] sqlx::Error),

    #[error("error delete user-profile")]
    DeleteFailed(#[source] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// Classifies an INSERT failure: unique violations become `Conflict`.
    pub fn from_insert(e: sqlx::Error) -> Self {
        if is_unique_violation(&e) {
            return RepoError::Conflict;
        }
        RepoError::CreateFailed(e)
    }
}

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(dbe) = e
        && dbe.code().as_deref() == Some(UNIQUE_VIOLATION)
    {
        return true;
    }
    false
}
