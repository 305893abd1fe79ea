use std::sync::Arc;

use stylist_agent::{GenerationError, ShopAssistant};
use stylist_core::config::{AppConfig, ConfigError, LoadOptions};
use stylist_db::repositories::SqlProductRepository;
use stylist_db::{connect_read_only, DbPool};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub assistant: ShopAssistant,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database url rejected: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
    #[error("text generation client setup failed: {0}")]
    Generation(#[source] GenerationError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    // The catalog is read-only here; schema and demo data belong to `stylist migrate`/`seed`.
    let db_pool = connect_read_only(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .map_err(BootstrapError::DatabaseUrl)?;
    info!(
        event_name = "system.bootstrap.catalog_opened",
        correlation_id = "bootstrap",
        "catalog opened read-only"
    );

    let repository = Arc::new(SqlProductRepository::new(db_pool.clone()));
    let assistant =
        ShopAssistant::from_config(&config, repository).map_err(BootstrapError::Generation)?;
    info!(
        event_name = "system.bootstrap.assistant_ready",
        correlation_id = "bootstrap",
        generation_enabled = config.generation.enabled,
        match_mode = ?config.search.match_mode,
        "assistant initialized"
    );

    Ok(Application { config, db_pool, assistant })
}
