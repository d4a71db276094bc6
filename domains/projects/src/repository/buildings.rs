//! Building repository

use crate::domain::entities::{Building, BuildingUpdate, NewBuilding};
use siteplan_common::{Error, RepositoryError, Result};
use sqlx::PgPool;

#[derive(Clone)]
pub struct BuildingRepository {
    pool: PgPool,
}

fn building_not_found(id: i64) -> Error {
    Error::NotFound(format!("Building {} not found", id))
}

impl BuildingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a building on a project
    pub async fn create(&self, new: &NewBuilding) -> Result<Building> {
        let created = sqlx::query_as::<_, Building>(
            r#"
            INSERT INTO buildings (project_id, coordinates, floors, floors_height)
            VALUES ($1, $2, $3, $4)
            RETURNING id, project_id, coordinates, floors, floors_height
            "#,
        )
        .bind(new.project_id)
        .bind(new.coordinates())
        .bind(new.floors())
        .bind(new.floors_height())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match RepositoryError::classify(e) {
            RepositoryError::NotFound => {
                Error::NotFound(format!("Project {} not found", new.project_id))
            }
            other => other.into(),
        })?;

        tracing::info!(
            building_id = created.id,
            project_id = created.project_id,
            "Building created"
        );
        Ok(created)
    }

    /// Find building by ID
    pub async fn find(&self, id: i64) -> Result<Option<Building>> {
        let building = sqlx::query_as::<_, Building>(
            r#"
            SELECT id, project_id, coordinates, floors, floors_height
            FROM buildings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(building)
    }

    /// List the buildings of a project in creation order
    pub async fn list_by_project(&self, project_id: i64) -> Result<Vec<Building>> {
        let buildings = sqlx::query_as::<_, Building>(
            r#"
            SELECT id, project_id, coordinates, floors, floors_height
            FROM buildings
            WHERE project_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(buildings)
    }

    /// Replace a building's outline and floor layout
    pub async fn update(&self, id: i64, update: &BuildingUpdate) -> Result<Building> {
        sqlx::query_as::<_, Building>(
            r#"
            UPDATE buildings SET
                coordinates = $2,
                floors = $3,
                floors_height = $4
            WHERE id = $1
            RETURNING id, project_id, coordinates, floors, floors_height
            "#,
        )
        .bind(id)
        .bind(&update.coordinates)
        .bind(update.floors)
        .bind(update.floors_height)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| building_not_found(id))
    }

    /// Delete a building
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM buildings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(building_not_found(id));
        }

        tracing::info!(building_id = id, "Building deleted");
        Ok(())
    }
}
