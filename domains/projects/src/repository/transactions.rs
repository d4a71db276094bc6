//! Transactional free functions for Projects domain

use crate::domain::entities::{NewProject, Project};
use siteplan_common::RepositoryError;
use sqlx::{Postgres, Transaction};

/// Insert a project within an existing transaction.
pub async fn create_project_tx(
    transaction: &mut Transaction<'_, Postgres>,
    new: &NewProject,
) -> std::result::Result<Project, sqlx::Error> {
    let created = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (name)
        VALUES ($1)
        RETURNING id, name
        "#,
    )
    .bind(new.name())
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}

/// Link a user to a project as an owner within an existing transaction.
///
/// Linking an existing owner again is a no-op. Returns
/// `RepositoryError::NotFound` if either the project or the user is missing.
pub async fn add_owner_tx(
    transaction: &mut Transaction<'_, Postgres>,
    project_id: i64,
    user_id: i64,
) -> std::result::Result<(), RepositoryError> {
    sqlx::query(
        r#"
        INSERT INTO project_owners (project_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (project_id, user_id) DO NOTHING
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .execute(&mut **transaction)
    .await
    .map_err(RepositoryError::classify)?;
    Ok(())
}
