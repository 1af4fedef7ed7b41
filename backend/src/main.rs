//! Service entry-point: loads settings, prepares the record store and runs
//! the HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use employee_api::inbound::http::health::HealthState;
use employee_api::outbound::persistence::{DbPool, run_pending_migrations};
use employee_api::settings::{AppSettings, LogFormat};

use server::{ServerConfig, create_server};

fn init_tracing(format: LogFormat) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn server_config(settings: &AppSettings) -> Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr()?)
        .with_operation_timeout(settings.store_operation_timeout());

    let Some(pool_config) = settings.pool_config() else {
        return Ok(config);
    };

    run_pending_migrations(pool_config.database_url())
        .await
        .wrap_err("failed to migrate the employee database")?;
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build the database pool")?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    init_tracing(settings.log_format()?);

    let config = server_config(&settings).await?;
    info!(addr = %config.bind_addr(), "starting employee service");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await.wrap_err("server terminated unexpectedly")
}
