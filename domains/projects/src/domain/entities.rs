//! Record types for the Projects domain
//!
//! Each record mirrors one table. Defaults for unset insert fields match the
//! column defaults declared in the migrations.

use serde::{Deserialize, Serialize};

use crate::domain::coordinates::Coordinates;

/// Placeholder name for projects created without one
pub const DEFAULT_PROJECT_NAME: &str = "Безымянный";

/// Default number of floors for a new building
pub const DEFAULT_FLOORS: i32 = 1;

/// Default height of a single floor, in metres
pub const DEFAULT_FLOORS_HEIGHT: f64 = 3.0;

/// Project entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Playground entity, at most one per project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Playground {
    pub id: i64,
    pub project_id: i64,
    pub coordinates: Coordinates,
}

/// Building entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Building {
    pub id: i64,
    pub project_id: i64,
    pub coordinates: Coordinates,
    pub floors: i32,
    pub floors_height: f64,
}

impl Building {
    /// Total height of the building
    pub fn height(&self) -> f64 {
        f64::from(self.floors) * self.floors_height
    }
}

/// Insert payload for a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewProject {
    #[serde(default)]
    pub name: Option<String>,
}

impl NewProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Name to store, falling back to the placeholder
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME)
    }
}

/// Insert payload for a playground
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewPlayground {
    pub project_id: i64,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl NewPlayground {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: impl Into<Coordinates>) -> Self {
        self.coordinates = Some(coordinates.into());
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates.clone().unwrap_or_default()
    }
}

/// Insert payload for a building
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBuilding {
    pub project_id: i64,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub floors: Option<i32>,
    #[serde(default)]
    pub floors_height: Option<f64>,
}

impl NewBuilding {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            coordinates: None,
            floors: None,
            floors_height: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: impl Into<Coordinates>) -> Self {
        self.coordinates = Some(coordinates.into());
        self
    }

    pub fn with_floors(mut self, floors: i32, floors_height: f64) -> Self {
        self.floors = Some(floors);
        self.floors_height = Some(floors_height);
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates.clone().unwrap_or_default()
    }

    pub fn floors(&self) -> i32 {
        self.floors.unwrap_or(DEFAULT_FLOORS)
    }

    pub fn floors_height(&self) -> f64 {
        self.floors_height.unwrap_or(DEFAULT_FLOORS_HEIGHT)
    }
}

/// Full replacement of a building's mutable attributes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuildingUpdate {
    pub coordinates: Coordinates,
    pub floors: i32,
    pub floors_height: f64,
}

/// A project with everything placed on it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetails {
    pub project: Project,
    pub buildings: Vec<Building>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playground: Option<Playground>,
}
