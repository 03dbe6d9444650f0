//! Backend entry-point: loads settings, picks the task store and runs the
//! HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig, create_server};
use todo_backend::inbound::http::health::HealthState;
use todo_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use todo_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Application bootstrap.
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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        key_fingerprint = %session.key_fingerprint(),
        cookie_secure = session.cookie_secure,
        "session settings loaded"
    );

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
    )
    .with_accounts(settings.accounts()?)
    .with_event_capacity(settings.event_capacity());

    match settings.database_url() {
        Some(database_url) => {
            let applied = run_pending_migrations(database_url)
                .await
                .wrap_err("failed to migrate task store")?;
            info!(applied, "task store migrations applied");
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .wrap_err("failed to connect to task store")?;
            config = config.with_db_pool(pool);
        }
        None => info!("no database configured; tasks are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = config.bind_addr();
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}
