//! Seed the database with demo data.

use tracing::info;

use palengke_server::{db, seed};

/// Seed the demo user, shop, branch, and items.
///
/// Runs migrations first so seeding works against a fresh database file.
/// Safe to re-run; existing demo data is left untouched.
///
/// # Errors
///
/// Returns an error if the database connection, a migration, or seeding fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url();

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    db::MIGRATOR.run(&pool).await?;

    seed::seed_demo_data(&pool).await?;
    info!(username = seed::DEMO_USERNAME, "Demo data seeded");

    Ok(())
}
