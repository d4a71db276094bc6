//! Playground repository

use crate::domain::coordinates::Coordinates;
use crate::domain::entities::{NewPlayground, Playground};
use siteplan_common::{Error, RepositoryError, Result};
use sqlx::PgPool;

#[derive(Clone)]
pub struct PlaygroundRepository {
    pool: PgPool,
}

fn playground_not_found(id: i64) -> Error {
    Error::NotFound(format!("Playground {} not found", id))
}

impl PlaygroundRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the playground of a project.
    ///
    /// Fails with `Conflict` when the project already has one and with
    /// `NotFound` when the project does not exist.
    pub async fn create(&self, new: &NewPlayground) -> Result<Playground> {
        let created = sqlx::query_as::<_, Playground>(
            r#"
            INSERT INTO playgrounds (project_id, coordinates)
            VALUES ($1, $2)
            RETURNING id, project_id, coordinates
            "#,
        )
        .bind(new.project_id)
        .bind(new.coordinates())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match RepositoryError::classify(e) {
            RepositoryError::AlreadyExists => Error::Conflict(format!(
                "Project {} already has a playground",
                new.project_id
            )),
            RepositoryError::NotFound => {
                Error::NotFound(format!("Project {} not found", new.project_id))
            }
            other => other.into(),
        })?;

        tracing::info!(
            playground_id = created.id,
            project_id = created.project_id,
            "Playground created"
        );
        Ok(created)
    }

    /// Find playground by ID
    pub async fn find(&self, id: i64) -> Result<Option<Playground>> {
        let playground = sqlx::query_as::<_, Playground>(
            r#"
            SELECT id, project_id, coordinates
            FROM playgrounds
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(playground)
    }

    /// Find the playground of a project, if it has one
    pub async fn find_by_project(&self, project_id: i64) -> Result<Option<Playground>> {
        let playground = sqlx::query_as::<_, Playground>(
            r#"
            SELECT id, project_id, coordinates
            FROM playgrounds
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(playground)
    }

    /// Replace the playground outline
    pub async fn update_coordinates(
        &self,
        id: i64,
        coordinates: &Coordinates,
    ) -> Result<Playground> {
        sqlx::query_as::<_, Playground>(
            r#"
            UPDATE playgrounds SET coordinates = $2
            WHERE id = $1
            RETURNING id, project_id, coordinates
            "#,
        )
        .bind(id)
        .bind(coordinates)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| playground_not_found(id))
    }

    /// Delete a playground, leaving its project in place
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM playgrounds WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(playground_not_found(id));
        }

        tracing::info!(playground_id = id, "Playground deleted");
        Ok(())
    }
}
