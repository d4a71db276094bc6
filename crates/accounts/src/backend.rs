//! Account lookup backend
//!
//! Wraps `PgPool` and owns the account-specific SQL queries.
//! Uses runtime `sqlx::query_as` (not macros) because the table is
//! owned by the external authentication subsystem.

use sqlx::PgPool;

use crate::error::AccountError;
use crate::types::UserAccount;

/// Account lookup backend.
///
/// Cheap to clone; every clone shares the same pool.
#[derive(Clone)]
pub struct AccountBackend {
    pool: PgPool,
}

impl AccountBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user account by ID
    pub async fn find_user(&self, id: i64) -> Result<Option<UserAccount>, AccountError> {
        sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT id, username, is_active, is_staff
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = id, "Failed to load user");
            AccountError::UserLoadError(e)
        })
    }

    /// Load a user account by ID, failing when it does not exist
    pub async fn get_user(&self, id: i64) -> Result<UserAccount, AccountError> {
        self.find_user(id).await?.ok_or(AccountError::UserNotFound)
    }

    /// Load several accounts at once, ordered by username
    pub async fn find_many(&self, ids: &[i64]) -> Result<Vec<UserAccount>, AccountError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT id, username, is_active, is_staff
            FROM users
            WHERE id = ANY($1)
            ORDER BY username ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load users");
            AccountError::UserLoadError(e)
        })
    }
}
