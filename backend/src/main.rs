//! Backend entry-point: loads settings, picks adapters, and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use clarity::inbound::http::health::HealthState;
use clarity::inbound::http::token_config::{BuildMode, token_secret_from_env};
use clarity::outbound::persistence::{DbPool, run_pending_migrations};
use clarity::outbound::security::JwtSessionTokens;
use server::{AppSettings, ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;

    let secret = token_secret_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("failed to load token secret")?;
    let tokens = JwtSessionTokens::new(secret.as_bytes(), settings.token_ttl());
    drop(secret);

    let mut config = ServerConfig::new(&settings, tokens);
    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(settings.pool_config(url))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %settings.bind_addr(), "listening");
    server.await?;
    Ok(())
}
