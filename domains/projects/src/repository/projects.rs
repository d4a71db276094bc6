//! Project repository

use crate::domain::entities::{NewProject, Project, ProjectDetails};
use crate::repository::buildings::BuildingRepository;
use crate::repository::playgrounds::PlaygroundRepository;
use crate::repository::transactions::{add_owner_tx, create_project_tx};
use siteplan_accounts::UserAccount;
use siteplan_common::{Error, Pagination, RepositoryError, Result};
use sqlx::PgPool;

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

fn project_not_found(id: i64) -> Error {
    Error::NotFound(format!("Project {} not found", id))
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a project without owners
    pub async fn create(&self, new: &NewProject) -> Result<Project> {
        let mut tx = self.pool.begin().await?;
        let created = create_project_tx(&mut tx, new).await?;
        tx.commit().await?;

        tracing::info!(project_id = created.id, "Project created");
        Ok(created)
    }

    /// Create a project and link its first owner in one transaction
    pub async fn create_with_owner(&self, new: &NewProject, owner_id: i64) -> Result<Project> {
        let mut tx = self.pool.begin().await?;

        let created = create_project_tx(&mut tx, new).await?;
        add_owner_tx(&mut tx, created.id, owner_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => {
                    Error::NotFound(format!("User {} not found", owner_id))
                }
                other => other.into(),
            })?;

        tx.commit().await?;

        tracing::info!(
            project_id = created.id,
            owner_id = owner_id,
            "Project created with owner"
        );
        Ok(created)
    }

    /// Find project by ID
    pub async fn find(&self, id: i64) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// List projects in creation order
    pub async fn list(&self, pagination: Pagination) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name
            FROM projects
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    /// Rename a project
    pub async fn rename(&self, id: i64, name: &str) -> Result<Project> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET name = $2
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| project_not_found(id))
    }

    /// Delete a project. Its playground, buildings and owner links go with it.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(project_not_found(id));
        }

        tracing::info!(project_id = id, "Project deleted");
        Ok(())
    }

    /// Link a user as an owner of the project
    pub async fn add_owner(&self, project_id: i64, user_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        add_owner_tx(&mut tx, project_id, user_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => Error::NotFound(format!(
                    "Project {} or user {} not found",
                    project_id, user_id
                )),
                other => other.into(),
            })?;
        tx.commit().await?;
        Ok(())
    }

    /// Unlink an owner. Returns whether a link was removed.
    pub async fn remove_owner(&self, project_id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM project_owners
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Owners of a project, ordered by username
    pub async fn owners(&self, project_id: i64) -> Result<Vec<UserAccount>> {
        let owners = sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT u.id, u.username, u.is_active, u.is_staff
            FROM users u
            INNER JOIN project_owners po ON po.user_id = u.id
            WHERE po.project_id = $1
            ORDER BY u.username ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(owners)
    }

    /// Projects owned by a user
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.id, p.name
            FROM projects p
            INNER JOIN project_owners po ON po.project_id = p.id
            WHERE po.user_id = $1
            ORDER BY p.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    /// Load a project together with its buildings and playground
    pub async fn details(&self, id: i64) -> Result<ProjectDetails> {
        let project = self.find(id).await?.ok_or_else(|| project_not_found(id))?;

        let buildings = BuildingRepository::new(self.pool.clone())
            .list_by_project(id)
            .await?;
        let playground = PlaygroundRepository::new(self.pool.clone())
            .find_by_project(id)
            .await?;

        Ok(ProjectDetails {
            project,
            buildings,
            playground,
        })
    }
}
