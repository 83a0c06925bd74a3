//! Run database migrations.

use tracing::info;

use palengke_server::db;

/// Apply all pending schema migrations.
///
/// # Errors
///
/// Returns an error if the database connection or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url();

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    db::MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    Ok(())
}
