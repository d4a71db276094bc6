//! Projects domain: projects, playgrounds, buildings

pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::coordinates::{Coordinates, Point};
pub use domain::entities::{
    Building, BuildingUpdate, NewBuilding, NewPlayground, NewProject, Playground, Project,
    ProjectDetails, DEFAULT_FLOORS, DEFAULT_FLOORS_HEIGHT, DEFAULT_PROJECT_NAME,
};

// Re-export repository types
pub use repository::{
    BuildingRepository, PlaygroundRepository, ProjectRepository, ProjectsRepositories,
};
