//! Backend entry-point: loads settings, selects storage and serves the
//! student records API.

mod server;

use std::env;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_student_service, create_server, mark_unhealthy_on};
use student_records::example_data::{ExampleDataSettings, seed_example_data_on_startup};
use student_records::inbound::http::health::HealthState;
use student_records::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use student_records::settings::AppSettings;

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

    let settings = AppSettings::load_from_iter(env::args_os())
        .map_err(|error| eyre!("failed to load service settings: {error}"))?;
    // Example data is configured through the environment and config file only.
    let example_data = ExampleDataSettings::load_from_iter(env::args_os().take(1))
        .map_err(|error| eyre!("failed to load example data settings: {error}"))?;

    let bind_addr = settings.socket_addr(ambient_port())?;
    let merge_policy = settings.merge_policy()?;
    let db_pool = match settings.database_url() {
        Some(url) => Some(connect_database(url).await?),
        None => {
            info!("no database configured; students are kept in memory");
            None
        }
    };

    let config = ServerConfig::new(bind_addr)
        .with_db_pool(db_pool)
        .with_merge_policy(merge_policy);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::build_prometheus());

    let service = build_student_service(&config);
    seed_example_data_on_startup(&example_data, service.as_ref())
        .await
        .wrap_err("example data seeding failed")?;

    let health_state = web::Data::new(HealthState::new());
    actix_web::rt::spawn(mark_unhealthy_on(health_state.clone(), shutdown_signal()));
    let server = create_server(health_state, config, service)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, %merge_policy, "student records API listening");
    server.await.wrap_err("server terminated with an error")
}

/// Resolves on Ctrl-C; never resolves when the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}

/// Port from a plain `PORT` variable, as set by most hosting platforms.
fn ambient_port() -> Option<u16> {
    let raw = env::var("PORT").ok()?;
    raw.trim()
        .parse()
        .inspect_err(|error| warn!(value = %raw, %error, "ignoring malformed PORT"))
        .ok()
}

/// Apply embedded migrations, then open the connection pool.
async fn connect_database(url: &str) -> Result<DbPool> {
    let migration_url = url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|error| eyre!("migration task panicked: {error}"))??;
    info!(applied, "database migrations complete");

    DbPool::new(PoolConfig::new(url))
        .await
        .wrap_err("failed to build database pool")
}
