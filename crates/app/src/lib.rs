//! Siteplan application composition root
//!
//! Wires configuration, the connection pool, migrations, repositories and the
//! admin site into one [`AppContext`] that a back-office host can embed.

pub mod telemetry;

use siteplan_accounts::AccountBackend;
use siteplan_admin::{default_site, AdminSite};
use siteplan_common::{connect, Config};
use siteplan_projects::ProjectsRepositories;
use sqlx::migrate::Migrator;
use sqlx::PgPool;

/// Schema migrations for every table the workspace owns
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Everything a host needs to serve the back office
#[derive(Clone)]
pub struct AppContext {
    pub pool: PgPool,
    pub projects: ProjectsRepositories,
    pub accounts: AccountBackend,
    pub admin: AdminSite,
}

impl AppContext {
    /// Build the context over an already migrated pool
    pub fn new(pool: PgPool) -> Result<Self, anyhow::Error> {
        let admin = default_site()?;

        Ok(Self {
            projects: ProjectsRepositories::new(pool.clone()),
            accounts: AccountBackend::new(pool.clone()),
            admin,
            pool,
        })
    }
}

/// Apply pending migrations
pub async fn migrate(pool: &PgPool) -> Result<(), anyhow::Error> {
    MIGRATOR.run(pool).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to run migrations");
        anyhow::anyhow!("Migration failed: {}", e)
    })?;

    tracing::info!("Migrations applied");
    Ok(())
}

/// Install logging, connect, migrate and assemble the application context
pub async fn bootstrap(config: &Config) -> Result<AppContext, anyhow::Error> {
    telemetry::init(config);

    let pool = connect(config)
        .await
        .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;

    migrate(&pool).await?;

    let context = AppContext::new(pool)?;
    tracing::info!(
        models = ?context.admin.model_names(),
        "Application context ready"
    );

    Ok(context)
}
