use catalog_admin::{
    config::{catalog::load_default_config, database},
    core::catalog::{get_active_categories, get_all_colors, seed_from_config},
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the catalog configuration
    let config = load_default_config()
        .inspect_err(|e| error!("Critical error loading catalog configuration: {e}"))?;
    info!(
        "Loaded catalog configuration (probe timeout {}ms)",
        config.media.probe_timeout_ms
    );

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Seed reference data into empty tables
    seed_from_config(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed reference data: {e}"))?;

    let categories = get_active_categories(&db).await?;
    let colors = get_all_colors(&db).await?;
    info!(
        "Catalog ready: {} active categories, {} colors",
        categories.len(),
        colors.len()
    );

    Ok(())
}
