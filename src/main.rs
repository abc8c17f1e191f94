//! Event Organizer archival worker
//!
//! Connects to the database, applies migrations and archives ended events on
//! a fixed interval until interrupted.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn, error};

use event_organizer::{
    config::Settings,
    utils::logging,
    database::{DatabaseService, connection::{create_pool, run_migrations}},
    services::ServiceFactory,
    SystemClock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment first so EVENT_ORGANIZER__* values from .env are visible
    if let Err(e) = dotenv::dotenv() {
        eprintln!("No .env file loaded: {}", e);
    }

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", event_organizer::info());

    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database).await?;
    run_migrations(&db_pool).await?;

    let database_service = DatabaseService::new(db_pool);
    let services = ServiceFactory::new(database_service.stores(), Arc::new(SystemClock), &settings);

    if !settings.archive.enabled {
        warn!("Archival sweep disabled; nothing to do");
        return Ok(());
    }

    let mut interval = tokio::time::interval(Duration::from_secs(settings.archive.interval_seconds));
    if !settings.archive.run_on_startup {
        // The first tick completes immediately
        interval.tick().await;
    }

    info!(interval_seconds = settings.archive.interval_seconds, "Archival sweep scheduled");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = services.archival.archive_past_events().await {
                    error!(error = %e, severity = %e.severity(), "Archival sweep failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    if let Err(e) = database_service.health_check().await {
        warn!(error = %e, "Database unhealthy at shutdown");
    }
    database_service.pool().close().await;

    info!("Event Organizer stopped");
    Ok(())
}
