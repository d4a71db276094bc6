//! Repository implementations for Projects domain

pub mod buildings;
pub mod playgrounds;
pub mod projects;
pub mod transactions;

use sqlx::{PgPool, Postgres, Transaction};

pub use buildings::BuildingRepository;
pub use playgrounds::PlaygroundRepository;
pub use projects::ProjectRepository;
pub use transactions::{add_owner_tx, create_project_tx};

/// Combined repository access for the Projects domain
#[derive(Clone)]
pub struct ProjectsRepositories {
    pool: PgPool,
    pub projects: ProjectRepository,
    pub playgrounds: PlaygroundRepository,
    pub buildings: BuildingRepository,
}

impl ProjectsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: ProjectRepository::new(pool.clone()),
            playgrounds: PlaygroundRepository::new(pool.clone()),
            buildings: BuildingRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
