//! Account read-model types

use serde::Serialize;

/// Lightweight view of a user account row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub is_active: bool,
    pub is_staff: bool,
}

impl std::fmt::Display for UserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.username)
    }
}
