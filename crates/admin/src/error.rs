//! Admin registration and changelist errors

use siteplan_common::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("'{model}' has no field named '{field}'")]
    UnknownField { model: String, field: String },

    #[error("Invalid field path '{0}'")]
    InvalidFieldPath(String),

    #[error("Unsupported lookup '{path}': {reason}")]
    UnsupportedLookup { path: String, reason: String },

    #[error("Model '{0}' is not registered")]
    NotRegistered(String),

    #[error("Model '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Filtering '{model}' by '{field}' is not allowed")]
    FilterNotAllowed { model: String, field: String },

    #[error("Invalid value '{value}' for filter '{field}'")]
    InvalidFilterValue { field: String, value: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AdminError {
    pub(crate) fn unsupported(path: &str, reason: impl Into<String>) -> Self {
        AdminError::UnsupportedLookup {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<AdminError> for Error {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::NotRegistered(_) => Error::NotFound(err.to_string()),
            AdminError::Database(e) => Error::Database(e),
            AdminError::AlreadyRegistered(_) => Error::Conflict(err.to_string()),
            other => Error::Validation(other.to_string()),
        }
    }
}
