//! ExamGuard exam monitoring service
//!
//! Main application entry point

use anyhow::Context;
use tracing::info;

use ExamGuard::{
    config::Settings,
    database::{connection, DatabaseService},
    server::{serve, AppState},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the server
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", ExamGuard::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig::from_settings(&settings.database);
    let db_pool = connection::create_pool(&db_config)
        .await
        .context("Failed to connect to the database")?;

    // Run database migrations
    info!("Running database migrations...");
    connection::run_migrations(&db_pool).await?;

    // Initialize services and state
    let database_service = DatabaseService::new(db_pool);
    let state = AppState::new(database_service, settings);

    info!("ExamGuard is ready");

    serve(state).await?;

    info!("ExamGuard has been shut down");

    Ok(())
}
