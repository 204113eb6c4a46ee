//! Serves the collaboration platform over HTTP.
//!
//! Configuration comes from the environment (see [`AppConfig::from_env`]).
//! Without `DATABASE_URL` the server keeps all state in memory.

use sbercollab::config::AppConfig;
use sbercollab::db::{self, DbError};
use sbercollab::http::{AppState, Repositories, router};
use sbercollab::seed::seed_demo_data;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOG_FILTER: &str = "sbercollab=info,tower_http=info";
const POOL_SIZE: u32 = 10;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;
    info!(
        app = %config.app_name,
        environment = %config.environment,
        "configuration loaded"
    );

    let repos = repositories(&config)?;
    let state = AppState::new(&config, &repos);
    if config.seed_demo_data {
        seed_demo_data(&state, &repos).await?;
    }

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, prefix = %config.api_prefix, "listening");
    axum::serve(listener, router(state, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

fn repositories(config: &AppConfig) -> Result<Repositories, DbError> {
    let Some(url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set; state will not survive a restart");
        return Ok(Repositories::in_memory());
    };
    let pool = db::connect(url, POOL_SIZE)?;
    db::run_migrations(&pool)?;
    Ok(Repositories::postgres(&pool))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
    }
}
