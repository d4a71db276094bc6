//! Account lookup errors

use siteplan_common::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Failed to load user: {0}")]
    UserLoadError(#[source] sqlx::Error),
}

impl From<AccountError> for Error {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::UserNotFound => Error::NotFound("User not found".to_string()),
            AccountError::UserLoadError(e) => Error::Database(e),
        }
    }
}
